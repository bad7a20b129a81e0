//! # Domain Model: Items
//!
//! An [`Item`] is the unit stored in the outline: a completion flag and one line of
//! text. Items know nothing about where they live; position, parent and depth are
//! owned by [`crate::hierarchy::Hierarchy`].
//!
//! ## Identity
//!
//! Every item carries an [`ItemId`] minted from a v4 UUID when the item is created.
//! Identity is the only thing that makes two items "the same": two items with equal
//! text and status are still different items, and an item keeps its id across any
//! number of edits and moves.
//!
//! ```text
//! Item { id: 6f1c…, done: false, text: "Buy milk" }
//! Item { id: 0b9e…, done: false, text: "Buy milk" }   <-- not equal
//! ```
//!
//! Callers that already hold an id (for example a client restoring a selection)
//! can build an item with [`Item::with_id`]; the store rejects ids it already knows.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, stable identity of an [`Item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ItemId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub done: bool,
    pub text: String,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            done: false,
            text: text.into(),
        }
    }

    pub fn with_id(id: ItemId, done: bool, text: impl Into<String>) -> Self {
        Self {
            id,
            done,
            text: text.into(),
        }
    }

    pub fn done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }
}

// Equality is identity, never content.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl std::hash::Hash for Item {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
