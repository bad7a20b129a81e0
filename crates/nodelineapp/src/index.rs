//! # Item Addressing: Ids vs Outline Paths
//!
//! Items are identified by [`ItemId`]s, which are stable but impossible to type.
//! Clients that work from text (the CLI, scripts) address items by their position
//! instead, using 1-based dotted **outline paths**:
//!
//! ```text
//! 1      Groceries
//! 1.1        Milk
//! 1.2        Eggs
//! 2      Chores
//! 2.1        Laundry
//! ```
//!
//! A path is only meaningful against the current shape of the outline: after a move
//! or removal the same path may name a different item. Resolve paths to ids once, at
//! the boundary, and work with ids from then on.
//!
//! ## Selector Grammar
//!
//! - **Path**: `N(.N)*`, every component ≥ 1 (e.g. `3`, `1.2.4`)
//! - **Range**: `Start-End` over siblings (e.g. `1.1-1.3`, `2-4`)
//!   - Both ends must share the same parent: `1.2-2.1` is **invalid**
//!   - Start must be ≤ end: `3-1` is **invalid**
//!
//! ## Implementation
//!
//! - [`parse_selector`]: Parses user input like `"1.1-1.3"` into an [`ItemSelector`]
//! - [`resolve_path`] / [`resolve`]: Map paths and selectors to ids
//! - [`path_of`]: The inverse, from an id to its current path
//! - [`index_items`]: Walks the outline once, pairing each item with its path
//!
//! Always use [`index_items`] when listing; computing [`path_of`] per item redoes the
//! sibling scans for every line.

use crate::error::{NodelineError, Result};
use crate::hierarchy::Hierarchy;
use crate::model::{Item, ItemId};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A 1-based dotted position in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutlinePath(Vec<usize>);

impl OutlinePath {
    pub fn new(components: Vec<usize>) -> Result<Self> {
        if components.is_empty() || components.contains(&0) {
            let shown: Vec<String> = components.iter().map(|c| c.to_string()).collect();
            return Err(NodelineError::InvalidPath(shown.join(".")));
        }
        Ok(Self(components))
    }

    pub fn components(&self) -> &[usize] {
        &self.0
    }

    /// Zero-based level of the addressed item.
    pub fn level(&self) -> usize {
        self.0.len() - 1
    }

    /// Path of the parent, `None` for a root path.
    pub fn parent(&self) -> Option<OutlinePath> {
        match self.0.len() {
            1 => None,
            n => Some(OutlinePath(self.0[..n - 1].to_vec())),
        }
    }

    /// Zero-based index among siblings.
    pub fn index(&self) -> usize {
        self.0[self.0.len() - 1] - 1
    }

    fn sibling(&self, position: usize) -> OutlinePath {
        let mut components = self.0.clone();
        let last = components.len() - 1;
        components[last] = position;
        OutlinePath(components)
    }
}

impl fmt::Display for OutlinePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: Vec<String> = self.0.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", s.join("."))
    }
}

impl FromStr for OutlinePath {
    type Err = NodelineError;

    fn from_str(s: &str) -> Result<Self> {
        let components = s
            .split('.')
            .map(|part| part.parse::<usize>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| NodelineError::InvalidPath(s.to_string()))?;
        OutlinePath::new(components).map_err(|_| NodelineError::InvalidPath(s.to_string()))
    }
}

impl Serialize for OutlinePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A user input selecting one item or a run of siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    Path(OutlinePath),
    Range(OutlinePath, OutlinePath),
}

impl fmt::Display for ItemSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemSelector::Path(path) => write!(f, "{}", path),
            ItemSelector::Range(start, end) => write!(f, "{}-{}", start, end),
        }
    }
}

/// Parses a single input that may be either a path or a sibling range.
pub fn parse_selector(s: &str) -> Result<ItemSelector> {
    let s = s.trim();
    let Some((start, end)) = s.split_once('-') else {
        return s.parse().map(ItemSelector::Path);
    };

    let start: OutlinePath = start.parse()?;
    let end: OutlinePath = end.parse()?;
    if start.parent() != end.parent() {
        return Err(NodelineError::InvalidPath(format!(
            "{s}: range ends must be siblings"
        )));
    }
    if start.index() > end.index() {
        return Err(NodelineError::InvalidPath(format!(
            "{s}: range start is after its end"
        )));
    }
    Ok(ItemSelector::Range(start, end))
}

pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<ItemSelector>> {
    inputs.iter().map(|s| parse_selector(s.as_ref())).collect()
}

/// Walks the hierarchy down `path`, one child index per component.
pub fn resolve_path(hierarchy: &Hierarchy, path: &OutlinePath) -> Result<ItemId> {
    let mut current = None;
    for component in path.components() {
        let id = hierarchy
            .child_id(current, component - 1)
            .map_err(|_| NodelineError::PathNotFound(path.to_string()))?;
        current = Some(id);
    }
    current.ok_or_else(|| NodelineError::InvalidPath(path.to_string()))
}

pub fn resolve(hierarchy: &Hierarchy, selector: &ItemSelector) -> Result<Vec<ItemId>> {
    match selector {
        ItemSelector::Path(path) => resolve_path(hierarchy, path).map(|id| vec![id]),
        ItemSelector::Range(start, end) => {
            let first = start.components()[start.level()];
            let last = end.components()[end.level()];
            (first..=last)
                .map(|position| resolve_path(hierarchy, &start.sibling(position)))
                .collect()
        }
    }
}

/// Resolves every selector, dropping repeats while keeping first-seen order.
pub fn resolve_all(hierarchy: &Hierarchy, selectors: &[ItemSelector]) -> Result<Vec<ItemId>> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for selector in selectors {
        for id in resolve(hierarchy, selector)? {
            if seen.insert(id) {
                ids.push(id);
            }
        }
    }
    Ok(ids)
}

/// Current path of `id`.
pub fn path_of(hierarchy: &Hierarchy, id: ItemId) -> Result<OutlinePath> {
    let mut components = vec![hierarchy.index_of(id)? + 1];
    let mut current = hierarchy.parent(id)?;
    while let Some(parent) = current {
        components.push(hierarchy.index_of(parent)? + 1);
        current = hierarchy.parent(parent)?;
    }
    components.reverse();
    Ok(OutlinePath(components))
}

/// An item paired with the path it currently occupies.
#[derive(Debug, Clone, Serialize)]
pub struct IndexedItem<'a> {
    pub path: OutlinePath,
    #[serde(flatten)]
    pub item: &'a Item,
}

/// Assigns paths to every item in one pre-order pass.
pub fn index_items(hierarchy: &Hierarchy) -> Vec<IndexedItem<'_>> {
    let mut counters: Vec<usize> = Vec::new();
    hierarchy
        .iter_with_level()
        .map(|(level, item)| {
            counters.truncate(level + 1);
            if counters.len() == level + 1 {
                counters[level] += 1;
            } else {
                counters.push(1);
            }
            IndexedItem {
                path: OutlinePath(counters.clone()),
                item,
            }
        })
        .collect()
}
