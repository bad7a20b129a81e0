//! # CLI Behavior
//!
//! This is **one possible UI client** for nodeline, not the application itself.
//! The CLI is the only place that knows about files on disk, terminal output and exit
//! codes.
//!
//! ## One File per Invocation
//!
//! Each command names an outline file. The file is read, the command runs against the
//! in-memory outline, and mutating commands write the file back. Saving always emits
//! canonical tab indentation, so `nodeline normalize FILE` is a load followed by a save.
//!
//! `add` is the only command that accepts a file that does not exist yet; it starts
//! from an empty outline.
//!
//! ## Addressing Items
//!
//! Items are addressed by outline path, as printed by `nodeline show`:
//! `1` is the first root, `1.2` its second child, `1.1-1.3` a run of siblings.
//! Paths are resolved once, before the edit runs.
//!
//! ## Output
//!
//! - `show` prints the outline with paths and check boxes.
//! - Edits print the diff actions they produced, one per line.
//! - `--json` switches both to JSON on stdout.
//! - Logging goes to stderr (`--verbose` or `RUST_LOG`), so it never mixes with output.
//!
//! ## Module Structure
//!
//! - `commands`: Loading, dispatch, saving
//! - `render`: Output formatting
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
