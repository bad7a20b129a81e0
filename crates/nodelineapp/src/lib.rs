//! # Nodeline Architecture
//!
//! Nodeline is a **UI-agnostic outline library**: an ordered tree of to-do items that
//! can be edited structurally and saved as tab-indented plain text. The `nodeline`
//! binary is one client of it; a desktop outline view would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the nodeline CLI, an outline view, ...)            │
//! │  - Owns files, terminals, redraws                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Content (content.rs)                                       │
//! │  - File type negotiation, bytes ⇄ outline                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Destinations, selectors, one diff list per user intent   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Hierarchy Store (hierarchy/)                               │
//! │  - Arena forest, id → node cache, insert/remove/move        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Diffs, Not Reloads
//!
//! Every edit returns the [`hierarchy::DiffAction`]s it caused. A client that mirrors
//! the outline (an expandable tree view, for instance) replays them in order and
//! never has to rebuild from scratch.
//!
//! ## Key Principle: No I/O in the Core
//!
//! Nothing below the client writes to stdout or touches the filesystem, with the single
//! exception of [`config`], which reads its TOML file.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade; entry point for all edits
//! - [`hierarchy`]: The ordered forest and its diff actions
//! - [`outline`]: Plain-text outline parsing and rendering
//! - [`content`]: Loaders and the document content manager
//! - [`index`]: Dotted outline paths (`1.2`) and selectors
//! - [`model`]: Core data types (`Item`, `ItemId`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod hierarchy;
pub mod index;
pub mod model;
pub mod outline;
