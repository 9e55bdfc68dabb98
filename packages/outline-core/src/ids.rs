use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Opaque identifier for a row in the outline.
///
/// The core never mints ids on its own; callers obtain them from an [`IdSupplier`]
/// and only compare and hash them.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Caller-supplied row payload carried by every insert entry.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Row {
    pub id: NodeId,
    pub label: String,
}

impl Row {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Source of fresh node ids, owned by whoever builds rows.
pub trait IdSupplier {
    fn next_id(&mut self) -> NodeId;

    /// Build a row with a freshly supplied id.
    fn row(&mut self, label: impl Into<String>) -> Row
    where
        Self: Sized,
    {
        Row {
            id: self.next_id(),
            label: label.into(),
        }
    }
}

/// Prefix + counter supplier; useful for tests and demos.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: 0,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("row")
    }
}

impl IdSupplier for SequentialIds {
    fn next_id(&mut self) -> NodeId {
        self.counter += 1;
        NodeId(format!("{}-{}", self.prefix, self.counter))
    }
}
