use crate::ids::NodeId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A row as materialized by replay.
///
/// `order` is the 1-based position inside the sibling group and is recomputed on every
/// replay; it never appears in the log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub order: usize,
    /// `None` for root-level rows.
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn is_root_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether `other` belongs to the same sibling group.
    pub fn is_sibling_of(&self, other: &Node) -> bool {
        self.parent == other.parent
    }
}
