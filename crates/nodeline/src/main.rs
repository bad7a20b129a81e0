//! # Nodeline CLI Architecture
//!
//! Nodeline ships a small CLI client, but the binary is intentionally thin: the CLI
//! lives in `src/cli/`, while this file only invokes `cli::run()` and handles process
//! termination.
//!
//! ## Workspace Structure
//!
//! - `crates/nodelineapp/`: Core library: outline store, text codec, facade
//! - `crates/nodeline/`: This CLI tool, depends on `nodelineapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/nodeline/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - File loading, dispatch, saving (commands.rs)             │
//! │  - Terminal and JSON rendering (render.rs, styles.rs)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Content + API (crates/nodelineapp/src/{content,api}.rs)    │
//! │  - Bytes ⇄ outline, outline paths → ids                     │
//! │  - Returns diff actions for every edit                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command is one load → operate → save cycle on a single file. Edits print the
//! diff actions they produced, which makes the CLI a convenient way to watch what an
//! outline view would be told to redraw.
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests next to the code plus property tests under
//!   `crates/nodelineapp/tests/`.
//! - **CLI**: rendering is unit tested in `render.rs`; whole commands are exercised
//!   end to end in `tests/cli_e2e.rs` against temporary files.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
