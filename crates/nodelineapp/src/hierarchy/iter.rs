use super::{Hierarchy, NodeHandle};
use crate::model::Item;

/// Depth-first, pre-order walk over the forest.
///
/// Driven by an explicit stack, so deep outlines never recurse. Each call to
/// [`Hierarchy::iter`] starts a fresh walk.
pub struct Iter<'a> {
    hierarchy: &'a Hierarchy,
    stack: Vec<(usize, NodeHandle)>,
}

impl<'a> Iter<'a> {
    pub(super) fn new(hierarchy: &'a Hierarchy) -> Self {
        let stack = hierarchy
            .roots
            .iter()
            .rev()
            .map(|handle| (0, *handle))
            .collect();
        Self { hierarchy, stack }
    }

    fn next_with_level(&mut self) -> Option<(usize, &'a Item)> {
        let (level, handle) = self.stack.pop()?;
        let slot = self.hierarchy.slot(handle);
        self.stack
            .extend(slot.children.iter().rev().map(|child| (level + 1, *child)));
        Some((level, &slot.item))
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_with_level().map(|(_, item)| item)
    }
}

/// Same walk as [`Iter`], yielding each item with its depth (roots are level 0).
pub struct LevelIter<'a> {
    inner: Iter<'a>,
}

impl<'a> LevelIter<'a> {
    pub(super) fn new(hierarchy: &'a Hierarchy) -> Self {
        Self {
            inner: Iter::new(hierarchy),
        }
    }
}

impl<'a> Iterator for LevelIter<'a> {
    type Item = (usize, &'a Item);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_with_level()
    }
}
