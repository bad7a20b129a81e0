//! # Outline Text Format
//!
//! Outlines are persisted as plain text, one item per line, nesting expressed by
//! leading indentation:
//!
//! ```text
//! Groceries
//! 	Milk @done
//! 	Eggs
//! Chores
//! ```
//!
//! ## Reading
//!
//! Indentation is measured as a width: a tab counts 4, a space counts 1, and the
//! width is rounded *up* to whole levels (`"  x"` and `"\tx"` are both level 1).
//! The `@done` marker may appear anywhere on the line; every occurrence is stripped
//! and the line is marked done.
//!
//! Hand-edited files are rarely tidy, so levels are normalized before the forest is
//! built: the first line is always a root, and a line may be at most one level deeper
//! than the line before it. Nothing is ever rejected.
//!
//! ## Writing
//!
//! Rendering always emits canonical tabs, one per level, so `load → save` re-indents
//! a messy file. See [`RenderOptions`] for how completion is written back.
//!
//! There is no escaping. Text that would not survive a save and reload is refused by
//! [`check_text`].

mod parse;
mod render;

pub use parse::{build_forest, line_level, normalize_levels, parse, parse_line, TextLine, TextNode};
pub use render::{check_text, render, render_line, RenderOptions};

/// Marker that flags a line as done.
pub const DONE_MARKER: &str = "@done";
