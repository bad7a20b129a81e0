//! # API Facade
//!
//! The API layer is a **thin facade** over the hierarchy store. It is the single
//! entry point for clients that edit an outline, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Translates destinations**: a [`Destination`] names where new or moved items
//!   go, in the vocabulary a UI uses (drop *on* a row, drop *into* a row at a slot)
//! - **Shapes diff output**: every call returns the full, ordered `Vec<DiffAction>`
//!   for one user intent, ready to be replayed against a view
//! - **Normalizes inputs**: outline paths and ranges are resolved to ids here, via
//!   [`crate::index`]
//!
//! ## What the API Does NOT Do
//!
//! - **Structural logic**: that belongs in [`crate::hierarchy`]
//! - **I/O**: no files, no stdout; see [`crate::content`] for (de)serialization
//!
//! ## Expandable Parents
//!
//! Adding the first child to an item turns a leaf row into an expandable one. A view
//! has to redraw that row, so [`NodelineApi::add_items`] reports an
//! [`DiffAction::Updated`] for the target *before* the insertion whenever the target
//! had no children and the batch was not empty.

use crate::error::Result;
use crate::hierarchy::{DiffAction, Hierarchy, Iter};
use crate::index::{self, IndexedItem, ItemSelector, OutlinePath};
use crate::model::{Item, ItemId};
use crate::outline;
use tracing::debug;

/// Where items should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Append to the roots.
    OnRoot,
    /// Insert among the roots before `offset`.
    IntoRoot { offset: usize },
    /// Append to the children of the target.
    OnTarget(ItemId),
    /// Insert among the target's children before `offset`.
    IntoTarget { target: ItemId, offset: usize },
}

impl Destination {
    pub fn new(target: Option<ItemId>, offset: Option<usize>) -> Self {
        match (target, offset) {
            (None, None) => Destination::OnRoot,
            (None, Some(offset)) => Destination::IntoRoot { offset },
            (Some(target), None) => Destination::OnTarget(target),
            (Some(target), Some(offset)) => Destination::IntoTarget { target, offset },
        }
    }

    pub fn target(&self) -> Option<ItemId> {
        match self {
            Destination::OnRoot | Destination::IntoRoot { .. } => None,
            Destination::OnTarget(target) | Destination::IntoTarget { target, .. } => {
                Some(*target)
            }
        }
    }

    pub fn offset(&self) -> Option<usize> {
        match self {
            Destination::OnRoot | Destination::OnTarget(_) => None,
            Destination::IntoRoot { offset } | Destination::IntoTarget { offset, .. } => {
                Some(*offset)
            }
        }
    }
}

/// The main API facade for outline edits.
#[derive(Debug, Default)]
pub struct NodelineApi {
    hierarchy: Hierarchy,
}

impl NodelineApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    // --- edits ---

    /// Adds `items` at `destination`.
    ///
    /// Item text must be writable as a single outline line; see
    /// [`outline::check_text`]. An empty batch reports no actions.
    pub fn add_items(&mut self, items: Vec<Item>, destination: Destination) -> Result<Vec<DiffAction>> {
        for item in &items {
            outline::check_text(&item.text)?;
        }

        let target = destination.target();
        let was_leaf = match target {
            Some(id) => self.hierarchy.number_of_children(Some(id))? == 0,
            None => false,
        };

        let mut actions = self.hierarchy.insert(items, target, destination.offset())?;

        if let (true, Some(id), false) = (was_leaf, target, actions.is_empty()) {
            actions.insert(0, DiffAction::updated(id));
        }
        Ok(actions)
    }

    pub fn remove_items(&mut self, ids: &[ItemId]) -> Result<Vec<DiffAction>> {
        self.hierarchy.remove(ids)
    }

    pub fn move_items(&mut self, ids: &[ItemId], destination: Destination) -> Result<Vec<DiffAction>> {
        self.hierarchy
            .move_items(ids, destination.target(), destination.offset())
    }

    pub fn can_move(&self, ids: &[ItemId], target: Option<ItemId>) -> Result<bool> {
        self.hierarchy.can_move(ids, target)
    }

    pub fn set_done(&mut self, id: ItemId, done: bool) -> Result<Vec<DiffAction>> {
        self.hierarchy.set_done(id, done).map(|action| vec![action])
    }

    pub fn set_text(&mut self, id: ItemId, text: impl Into<String>) -> Result<Vec<DiffAction>> {
        let text = text.into();
        outline::check_text(&text)?;
        self.hierarchy.set_text(id, text).map(|action| vec![action])
    }

    /// Drops all content. Used before loading a new document.
    pub fn clear(&mut self) {
        self.hierarchy.clear();
    }

    // --- reads ---

    pub fn number_of_children(&self, parent: Option<ItemId>) -> Result<usize> {
        self.hierarchy.number_of_children(parent)
    }

    pub fn child(&self, parent: Option<ItemId>, index: usize) -> Result<&Item> {
        self.hierarchy.child(parent, index)
    }

    pub fn children(&self, parent: Option<ItemId>) -> Result<Vec<ItemId>> {
        self.hierarchy.children(parent)
    }

    pub fn parent(&self, id: ItemId) -> Result<Option<ItemId>> {
        self.hierarchy.parent(id)
    }

    pub fn level(&self, id: ItemId) -> Result<usize> {
        self.hierarchy.level(id)
    }

    pub fn get(&self, id: ItemId) -> Result<&Item> {
        self.hierarchy.get(id)
    }

    pub fn total_count(&self) -> usize {
        self.hierarchy.total_count()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.hierarchy.iter()
    }

    // --- paths ---

    pub fn resolve(&self, selector: &ItemSelector) -> Result<Vec<ItemId>> {
        index::resolve(&self.hierarchy, selector)
    }

    /// Parses and resolves user selectors (`"2"`, `"1.1-1.3"`), deduplicated in order.
    pub fn resolve_selectors<I: AsRef<str>>(&self, inputs: &[I]) -> Result<Vec<ItemId>> {
        let selectors = index::parse_selectors(inputs)?;
        let ids = index::resolve_all(&self.hierarchy, &selectors)?;
        debug!(selectors = selectors.len(), ids = ids.len(), "resolved selectors");
        Ok(ids)
    }

    pub fn resolve_path(&self, path: &OutlinePath) -> Result<ItemId> {
        index::resolve_path(&self.hierarchy, path)
    }

    pub fn path_of(&self, id: ItemId) -> Result<OutlinePath> {
        index::path_of(&self.hierarchy, id)
    }

    pub fn indexed(&self) -> Vec<IndexedItem<'_>> {
        index::index_items(&self.hierarchy)
    }
}
