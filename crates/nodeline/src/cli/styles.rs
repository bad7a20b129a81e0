//! Styles for the nodeline CLI.
//!
//! Renderers refer to styles by what they mark (an item path, a finished item), never by
//! color. `console` drops the escape codes when stdout is not a terminal, so piped output
//! stays plain.

use console::Style;
use once_cell::sync::Lazy;

/// Outline paths in listings (`1.2.`).
pub static PATH: Lazy<Style> = Lazy::new(|| Style::new().yellow());

/// Open item text.
pub static TEXT: Lazy<Style> = Lazy::new(Style::new);

/// Finished item text.
pub static DONE: Lazy<Style> = Lazy::new(|| Style::new().dim().strikethrough());

/// Check boxes and other decoration.
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());

pub static INSERTED: Lazy<Style> = Lazy::new(|| Style::new().green());

pub static REMOVED: Lazy<Style> = Lazy::new(|| Style::new().red());

pub static UPDATED: Lazy<Style> = Lazy::new(|| Style::new().cyan());
