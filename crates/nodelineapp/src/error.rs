use crate::model::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodelineError {
    #[error("Item not found: {0}")]
    UnknownItem(ItemId),

    #[error("Item already present: {0}")]
    DuplicateItem(ItemId),

    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Cannot move item {0} into itself or one of its descendants")]
    CyclicMove(ItemId),

    #[error("Unknown file format: {0}")]
    UnknownFormat(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid item text {text:?}: {reason}")]
    InvalidText { text: String, reason: &'static str },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NodelineError {
    /// True for errors that signal a broken caller contract rather than bad input.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            NodelineError::UnknownItem(_)
                | NodelineError::DuplicateItem(_)
                | NodelineError::IndexOutOfBounds { .. }
                | NodelineError::CyclicMove(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NodelineError>;
