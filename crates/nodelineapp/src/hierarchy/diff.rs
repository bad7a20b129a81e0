use crate::model::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::Range;

/// A minimal description of one change to the forest.
///
/// Indexes are always relative to the children of `parent` (or to the roots when
/// `parent` is `None`). For `Removed` they refer to the order *before* the removal,
/// for `Inserted` to the order *after* the insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum DiffAction {
    Updated {
        id: ItemId,
    },
    Inserted {
        indexes: BTreeSet<usize>,
        parent: Option<ItemId>,
    },
    Removed {
        indexes: BTreeSet<usize>,
        parent: Option<ItemId>,
    },
}

impl DiffAction {
    pub fn updated(id: ItemId) -> Self {
        DiffAction::Updated { id }
    }

    pub fn inserted(range: Range<usize>, parent: Option<ItemId>) -> Self {
        DiffAction::Inserted {
            indexes: range.collect(),
            parent,
        }
    }

    pub fn removed(indexes: BTreeSet<usize>, parent: Option<ItemId>) -> Self {
        DiffAction::Removed { indexes, parent }
    }

    /// The parent the indexes are relative to. `Updated` has none.
    pub fn parent(&self) -> Option<ItemId> {
        match self {
            DiffAction::Updated { .. } => None,
            DiffAction::Inserted { parent, .. } | DiffAction::Removed { parent, .. } => *parent,
        }
    }

    pub fn indexes(&self) -> Option<&BTreeSet<usize>> {
        match self {
            DiffAction::Updated { .. } => None,
            DiffAction::Inserted { indexes, .. } | DiffAction::Removed { indexes, .. } => {
                Some(indexes)
            }
        }
    }
}

/// Receiver of diff actions at the UI boundary.
///
/// The store itself only returns `Vec<DiffAction>`; adapters that animate a view
/// implement this to consume them in emission order.
pub trait DiffSink {
    fn apply(&mut self, action: &DiffAction);

    fn apply_all(&mut self, actions: &[DiffAction]) {
        for action in actions {
            self.apply(action);
        }
    }
}

impl DiffSink for Vec<DiffAction> {
    fn apply(&mut self, action: &DiffAction) {
        self.push(action.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserted_collects_range() {
        let action = DiffAction::inserted(2..5, None);
        assert_eq!(
            action.indexes().unwrap().iter().copied().collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        assert_eq!(action.parent(), None);
    }

    #[test]
    fn test_serializes_with_action_tag() {
        let parent = ItemId::new();
        let action = DiffAction::removed(BTreeSet::from([0, 2]), Some(parent));
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], "removed");
        assert_eq!(json["indexes"], serde_json::json!([0, 2]));
        assert_eq!(json["parent"], serde_json::json!(parent.to_string()));
    }

    #[test]
    fn test_vec_sink_keeps_order() {
        let id = ItemId::new();
        let mut sink: Vec<DiffAction> = Vec::new();
        sink.apply_all(&[DiffAction::updated(id), DiffAction::inserted(0..1, Some(id))]);
        assert_eq!(sink.len(), 2);
        assert!(matches!(sink[0], DiffAction::Updated { .. }));
        assert!(matches!(sink[1], DiffAction::Inserted { .. }));
    }
}
