use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::ids::NodeId;
use crate::node::Node;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Materialized forest produced by replaying a log.
///
/// Nodes are laid out breadth-first: the root level by order, then each parent's children
/// (parents taken in the order they appear) by order, one depth at a time. Equality is
/// sequence equality.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Snapshot {
    nodes: Vec<Node>,
}

impl Snapshot {
    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_vec(self) -> Vec<Node> {
        self.nodes
    }

    /// Nodes whose parent is `parent` (`None` for the root level), ascending by order.
    pub fn group(&self, parent: Option<&NodeId>) -> Vec<&Node> {
        let mut group: Vec<&Node> = self
            .nodes
            .iter()
            .filter(|n| n.parent.as_ref() == parent)
            .collect();
        group.sort_by_key(|n| n.order);
        group
    }

    /// Check id uniqueness, per-group order contiguity, and acyclic parent chains.
    /// Intended for tests and debugging.
    pub fn validate_invariants(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(&node.id) {
                return Err(Error::InconsistentState(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
        }

        let mut groups: HashMap<Option<&NodeId>, Vec<usize>> = HashMap::new();
        for node in &self.nodes {
            groups.entry(node.parent.as_ref()).or_default().push(node.order);
        }
        for (parent, mut orders) in groups {
            orders.sort_unstable();
            let contiguous = orders.iter().enumerate().all(|(i, &o)| o == i + 1);
            if !contiguous {
                let parent = parent.map(NodeId::to_string).unwrap_or_else(|| "root".into());
                return Err(Error::InconsistentState(format!(
                    "orders under {parent} are not 1..={}: {orders:?}",
                    orders.len()
                )));
            }
        }

        let by_id: HashMap<&NodeId, &Node> = self.nodes.iter().map(|n| (&n.id, n)).collect();
        for node in &self.nodes {
            let mut visited = HashSet::new();
            let mut current = Some(&node.id);
            while let Some(id) = current {
                if !visited.insert(id) {
                    return Err(Error::InconsistentState(format!(
                        "cycle through {}",
                        node.id
                    )));
                }
                current = by_id.get(id).and_then(|n| n.parent.as_ref());
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl From<Snapshot> for Vec<Node> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.nodes
    }
}
