//! # Hierarchy Store
//!
//! [`Hierarchy`] owns the canonical ordered forest of [`Item`]s. It answers
//! structural questions (how many children, which child at index, who is the parent)
//! and performs structural edits (insert, remove, move), describing every edit as a
//! list of [`DiffAction`]s so a view can update incrementally instead of reloading.
//!
//! ## Arena Layout
//!
//! Nodes live in an arena of slots addressed by [`NodeHandle`]s. A slot holds the
//! item, its ordered children and the handle of its parent (absent for roots).
//! Parent links are plain indexes, so there are no reference cycles to manage:
//!
//! ```text
//! roots:  [h0, h3]
//! slots:  h0 { "Groceries", parent: -,  children: [h1, h2] }
//!         h1 { "Milk",      parent: h0, children: [] }
//!         h2 { "Eggs",      parent: h0, children: [] }
//!         h3 { "Chores",    parent: -,  children: [] }
//! cache:  { id(Groceries) -> h0, id(Milk) -> h1, ... }
//! ```
//!
//! The locator cache maps every [`ItemId`] to its handle, so resolving an item never
//! walks the tree. Freed slots are recycled through a free list.
//!
//! ## Invariants
//!
//! After every public call:
//! - the cache and the forest hold exactly the same set of ids, each once;
//! - a node's parent handle is set iff it is not a root, and points at the node whose
//!   children contain it;
//! - sibling order is exactly the order produced by inserts and moves.
//!
//! Every operation validates all of its inputs before touching the forest. A call that
//! returns an error has changed nothing.
//!
//! ## Diff Actions
//!
//! - `insert` emits one [`DiffAction::Inserted`] covering the contiguous run.
//! - `remove` emits one [`DiffAction::Removed`] per distinct parent, with indexes from
//!   that parent's order before the removal.
//! - `move_items` emits the removals followed by one insertion.
//!
//! ## Redundant Selections
//!
//! When a removal or move names both an item and one of its descendants, the
//! descendant is dropped from the request: it travels with (or disappears with) its
//! ancestor and is not reported separately.

use crate::error::{NodelineError, Result};
use crate::model::{Item, ItemId};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};

mod diff;
mod iter;

pub use diff::{DiffAction, DiffSink};
pub use iter::{Iter, LevelIter};

/// Index of a slot in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeHandle(usize);

#[derive(Debug)]
struct Slot {
    item: Item,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
}

#[derive(Debug, Default)]
pub struct Hierarchy {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    roots: Vec<NodeHandle>,
    cache: HashMap<ItemId, NodeHandle>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently resolvable by id.
    pub fn total_count(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.cache.contains_key(&id)
    }

    pub fn get(&self, id: ItemId) -> Result<&Item> {
        let handle = self.handle(id)?;
        Ok(&self.slot(handle).item)
    }

    /// Children count of `parent`, or the root count when `parent` is `None`.
    pub fn number_of_children(&self, parent: Option<ItemId>) -> Result<usize> {
        let parent = self.resolve_parent(parent)?;
        Ok(self.children_of(parent).len())
    }

    pub fn child(&self, parent: Option<ItemId>, index: usize) -> Result<&Item> {
        let parent = self.resolve_parent(parent)?;
        let children = self.children_of(parent);
        let handle = children
            .get(index)
            .copied()
            .ok_or(NodelineError::IndexOutOfBounds {
                index,
                len: children.len(),
            })?;
        Ok(&self.slot(handle).item)
    }

    pub fn child_id(&self, parent: Option<ItemId>, index: usize) -> Result<ItemId> {
        self.child(parent, index).map(|item| item.id)
    }

    pub fn children(&self, parent: Option<ItemId>) -> Result<Vec<ItemId>> {
        let parent = self.resolve_parent(parent)?;
        Ok(self
            .children_of(parent)
            .iter()
            .map(|handle| self.slot(*handle).item.id)
            .collect())
    }

    /// Parent of `id`, `None` for roots.
    pub fn parent(&self, id: ItemId) -> Result<Option<ItemId>> {
        let handle = self.handle(id)?;
        Ok(self.slot(handle).parent.map(|p| self.slot(p).item.id))
    }

    /// Depth of `id`; roots are level 0.
    pub fn level(&self, id: ItemId) -> Result<usize> {
        let handle = self.handle(id)?;
        Ok(self.ancestors(handle).count())
    }

    /// Position of `id` among its siblings.
    pub fn index_of(&self, id: ItemId) -> Result<usize> {
        let handle = self.handle(id)?;
        Ok(self.position(handle))
    }

    /// Inserts `items` as one contiguous run under `destination` (roots when `None`).
    ///
    /// `index = None` appends; `index = Some(k)` inserts before the current `k`-th
    /// child, with `k` allowed to equal the child count. An empty batch changes
    /// nothing and reports no actions.
    pub fn insert(
        &mut self,
        items: Vec<Item>,
        destination: Option<ItemId>,
        index: Option<usize>,
    ) -> Result<Vec<DiffAction>> {
        let parent = self.resolve_parent(destination)?;
        let len = self.children_of(parent).len();
        let at = index.unwrap_or(len);
        if at > len {
            return Err(NodelineError::IndexOutOfBounds { index: at, len });
        }
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if self.cache.contains_key(&item.id) || !seen.insert(item.id) {
                return Err(NodelineError::DuplicateItem(item.id));
            }
        }

        let count = items.len();
        let handles: Vec<NodeHandle> = items
            .into_iter()
            .map(|item| self.allocate(item, parent))
            .collect();
        self.attach(parent, at, handles);

        debug!(count, at, parent = ?destination, "inserted items");
        Ok(vec![DiffAction::inserted(at..at + count, destination)])
    }

    /// Removes the given items together with their subtrees.
    pub fn remove(&mut self, ids: &[ItemId]) -> Result<Vec<DiffAction>> {
        let handles = self.resolve_unique(ids)?;
        let handles = self.outermost(&handles);

        let actions = self.detach(&handles);
        let evicted: usize = handles.into_iter().map(|h| self.release(h)).sum();

        debug!(evicted, groups = actions.len(), "removed items");
        Ok(actions)
    }

    /// Moves the given items (with their subtrees) under `destination`.
    ///
    /// `index` addresses the destination's children as they are *before* the move;
    /// moved siblings that precede it are accounted for. Moving an item into itself
    /// or one of its descendants fails with [`NodelineError::CyclicMove`].
    pub fn move_items(
        &mut self,
        ids: &[ItemId],
        destination: Option<ItemId>,
        index: Option<usize>,
    ) -> Result<Vec<DiffAction>> {
        let handles = self.resolve_unique(ids)?;
        let parent = self.resolve_parent(destination)?;

        if let Some(target) = parent {
            if let Some(blocking) = self.cycle_source(&handles, target) {
                let id = self.slot(blocking).item.id;
                warn!(%id, "refused move into own subtree");
                return Err(NodelineError::CyclicMove(id));
            }
        }

        let handles = self.outermost(&handles);
        let moving: HashSet<NodeHandle> = handles.iter().copied().collect();
        let siblings = self.children_of(parent);
        let len = siblings.len();
        let at = match index {
            Some(k) if k > len => return Err(NodelineError::IndexOutOfBounds { index: k, len }),
            Some(k) => k - siblings[..k].iter().filter(|h| moving.contains(*h)).count(),
            None => len - siblings.iter().filter(|h| moving.contains(*h)).count(),
        };
        if handles.is_empty() {
            return Ok(Vec::new());
        }

        let count = handles.len();
        let mut actions = self.detach(&handles);
        self.attach(parent, at, handles);
        actions.push(DiffAction::inserted(at..at + count, destination));

        debug!(count, at, parent = ?destination, "moved items");
        Ok(actions)
    }

    /// Whether `ids` may be moved under `target` without creating a cycle.
    ///
    /// Moving to the roots is always allowed. Moving into the current parent is
    /// allowed too (it is a reorder).
    pub fn can_move(&self, ids: &[ItemId], target: Option<ItemId>) -> Result<bool> {
        let handles = self.resolve_unique(ids)?;
        let Some(target) = target else {
            return Ok(true);
        };
        let target = self.handle(target)?;
        Ok(self.cycle_source(&handles, target).is_none())
    }

    pub fn set_done(&mut self, id: ItemId, done: bool) -> Result<DiffAction> {
        let handle = self.handle(id)?;
        self.slot_mut(handle).item.done = done;
        Ok(DiffAction::updated(id))
    }

    pub fn set_text(&mut self, id: ItemId, text: impl Into<String>) -> Result<DiffAction> {
        let handle = self.handle(id)?;
        self.slot_mut(handle).item.text = text.into();
        Ok(DiffAction::updated(id))
    }

    /// Drops every root, slot and cache entry.
    pub fn clear(&mut self) {
        let dropped = self.cache.len();
        self.slots.clear();
        self.free.clear();
        self.roots.clear();
        self.cache.clear();
        debug!(dropped, "cleared hierarchy");
    }

    /// Depth-first, pre-order walk over all items.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Like [`Hierarchy::iter`], paired with each item's level.
    pub fn iter_with_level(&self) -> LevelIter<'_> {
        LevelIter::new(self)
    }

    // --- internals ---

    fn handle(&self, id: ItemId) -> Result<NodeHandle> {
        self.cache
            .get(&id)
            .copied()
            .ok_or(NodelineError::UnknownItem(id))
    }

    fn resolve_parent(&self, parent: Option<ItemId>) -> Result<Option<NodeHandle>> {
        parent.map(|id| self.handle(id)).transpose()
    }

    /// Resolves ids to handles, dropping repeats but keeping first-seen order.
    fn resolve_unique(&self, ids: &[ItemId]) -> Result<Vec<NodeHandle>> {
        let mut seen = HashSet::with_capacity(ids.len());
        let mut handles = Vec::with_capacity(ids.len());
        for id in ids {
            let handle = self.handle(*id)?;
            if seen.insert(handle) {
                handles.push(handle);
            }
        }
        Ok(handles)
    }

    fn slot(&self, handle: NodeHandle) -> &Slot {
        match self.slots.get(handle.0) {
            Some(Some(slot)) => slot,
            _ => unreachable!("stale node handle {}", handle.0),
        }
    }

    fn slot_mut(&mut self, handle: NodeHandle) -> &mut Slot {
        match self.slots.get_mut(handle.0) {
            Some(Some(slot)) => slot,
            _ => unreachable!("stale node handle {}", handle.0),
        }
    }

    fn children_of(&self, parent: Option<NodeHandle>) -> &Vec<NodeHandle> {
        match parent {
            Some(handle) => &self.slot(handle).children,
            None => &self.roots,
        }
    }

    fn children_of_mut(&mut self, parent: Option<NodeHandle>) -> &mut Vec<NodeHandle> {
        match parent {
            Some(handle) => &mut self.slot_mut(handle).children,
            None => &mut self.roots,
        }
    }

    fn ancestors(&self, handle: NodeHandle) -> impl Iterator<Item = NodeHandle> + '_ {
        std::iter::successors(self.slot(handle).parent, move |h| self.slot(*h).parent)
    }

    fn position(&self, handle: NodeHandle) -> usize {
        let siblings = self.children_of(self.slot(handle).parent);
        match siblings.iter().position(|h| *h == handle) {
            Some(index) => index,
            None => unreachable!("node {} missing from its parent", handle.0),
        }
    }

    /// First handle of `handles` that is `target` or one of its ancestors.
    fn cycle_source(&self, handles: &[NodeHandle], target: NodeHandle) -> Option<NodeHandle> {
        std::iter::once(target)
            .chain(self.ancestors(target))
            .find(|h| handles.contains(h))
    }

    /// Keeps only handles with no ancestor in the same selection.
    fn outermost(&self, handles: &[NodeHandle]) -> Vec<NodeHandle> {
        let selected: HashSet<NodeHandle> = handles.iter().copied().collect();
        handles
            .iter()
            .copied()
            .filter(|h| !self.ancestors(*h).any(|a| selected.contains(&a)))
            .collect()
    }

    fn allocate(&mut self, item: Item, parent: Option<NodeHandle>) -> NodeHandle {
        let id = item.id;
        let slot = Slot {
            item,
            parent,
            children: Vec::new(),
        };
        let handle = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                NodeHandle(index)
            }
            None => {
                self.slots.push(Some(slot));
                NodeHandle(self.slots.len() - 1)
            }
        };
        self.cache.insert(id, handle);
        handle
    }

    fn attach(&mut self, parent: Option<NodeHandle>, at: usize, handles: Vec<NodeHandle>) {
        for handle in &handles {
            self.slot_mut(*handle).parent = parent;
        }
        self.children_of_mut(parent).splice(at..at, handles);
    }

    /// Unlinks `handles` from their parents, one removal action per parent.
    ///
    /// Indexes are computed for every handle before anything is unlinked, so each
    /// action reflects its parent's order prior to the call.
    fn detach(&mut self, handles: &[NodeHandle]) -> Vec<DiffAction> {
        let mut groups: Vec<(Option<NodeHandle>, BTreeSet<usize>)> = Vec::new();
        for handle in handles {
            let parent = self.slot(*handle).parent;
            let index = self.position(*handle);
            match groups.iter_mut().find(|(p, _)| *p == parent) {
                Some((_, indexes)) => {
                    indexes.insert(index);
                }
                None => groups.push((parent, BTreeSet::from([index]))),
            }
        }

        let mut actions = Vec::with_capacity(groups.len());
        for (parent, indexes) in groups {
            let parent_id = parent.map(|p| self.slot(p).item.id);
            let mut position = 0;
            self.children_of_mut(parent).retain(|_| {
                let keep = !indexes.contains(&position);
                position += 1;
                keep
            });
            actions.push(DiffAction::removed(indexes, parent_id));
        }

        for handle in handles {
            self.slot_mut(*handle).parent = None;
        }
        actions
    }

    /// Frees a detached subtree and evicts its ids. Returns the number of items freed.
    fn release(&mut self, root: NodeHandle) -> usize {
        let mut stack = vec![root];
        let mut freed = 0;
        while let Some(handle) = stack.pop() {
            if let Some(slot) = self.slots[handle.0].take() {
                self.cache.remove(&slot.item.id);
                stack.extend(slot.children);
                self.free.push(handle.0);
                freed += 1;
            }
        }
        freed
    }
}

// --- Test Fixtures ---

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds a hierarchy from `(level, text)` rows, outline style.
    ///
    /// Returns the hierarchy and a lookup from text to id. Texts must be unique.
    pub fn outline(rows: &[(usize, &str)]) -> (Hierarchy, HashMap<String, ItemId>) {
        let mut hierarchy = Hierarchy::new();
        let mut names = HashMap::new();
        let mut stack: Vec<ItemId> = Vec::new();
        for (level, text) in rows {
            stack.truncate(*level);
            let item = Item::new(*text);
            let id = item.id;
            hierarchy.insert(vec![item], stack.last().copied(), None).unwrap();
            names.insert(text.to_string(), id);
            stack.push(id);
        }
        (hierarchy, names)
    }

    pub fn texts(hierarchy: &Hierarchy) -> Vec<String> {
        hierarchy.iter().map(|item| item.text.clone()).collect()
    }

    pub fn child_texts(hierarchy: &Hierarchy, parent: Option<ItemId>) -> Vec<String> {
        hierarchy
            .children(parent)
            .unwrap()
            .into_iter()
            .map(|id| hierarchy.get(id).unwrap().text.clone())
            .collect()
    }

    /// Panics unless the cache and the forest agree exactly.
    pub fn assert_consistent(hierarchy: &Hierarchy) {
        let enumerated: Vec<ItemId> = hierarchy.iter().map(|item| item.id).collect();
        let unique: HashSet<ItemId> = enumerated.iter().copied().collect();
        assert_eq!(unique.len(), enumerated.len(), "duplicate ids in forest");
        assert_eq!(hierarchy.total_count(), enumerated.len());

        for id in enumerated {
            let handle = hierarchy.handle(id).unwrap();
            let slot = hierarchy.slot(handle);
            assert_eq!(slot.item.id, id);
            let siblings = hierarchy.children_of(slot.parent);
            assert!(siblings.contains(&handle), "{id} missing from its parent");
        }
        for root in &hierarchy.roots {
            assert!(hierarchy.slot(*root).parent.is_none());
        }
    }

    pub fn set(indexes: &[usize]) -> BTreeSet<usize> {
        indexes.iter().copied().collect()
    }
}
