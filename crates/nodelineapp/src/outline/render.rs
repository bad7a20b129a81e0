use super::DONE_MARKER;
use crate::error::{NodelineError, Result};
use crate::hierarchy::Hierarchy;
use crate::model::Item;

/// Controls how items are written back to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append `@done` to completed items. Without it, completion is lost on save.
    pub done_marker: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { done_marker: true }
    }
}

/// Renders the whole forest, one tab-indented line per item, no trailing newline.
pub fn render(hierarchy: &Hierarchy, options: RenderOptions) -> String {
    hierarchy
        .iter_with_level()
        .map(|(level, item)| render_line(level, item, options))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_line(level: usize, item: &Item, options: RenderOptions) -> String {
    let indent = "\t".repeat(level);
    match (options.done_marker && item.done, item.text.is_empty()) {
        (true, true) => format!("{indent}{DONE_MARKER}"),
        (true, false) => format!("{indent}{} {DONE_MARKER}", item.text),
        (false, _) => format!("{indent}{}", item.text),
    }
}

/// Fails for text that would not read back unchanged as a single line.
///
/// Reading trims each line and strips the done marker wherever it appears.
pub fn check_text(text: &str) -> Result<()> {
    let reason = if text.contains('\n') {
        "line breaks are not allowed"
    } else if text.trim() != text {
        "leading or trailing whitespace is not allowed"
    } else if text.contains(DONE_MARKER) {
        "the done marker is reserved"
    } else {
        return Ok(());
    };
    Err(NodelineError::InvalidText {
        text: text.to_string(),
        reason,
    })
}
