use crate::ids::{NodeId, Row};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The structural edits recorded in the log.
///
/// Entries carry no order values: positions are derived when the log is replayed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum LogEntry {
    /// Append a row at the end of the root level.
    Add { row: Row },
    /// Insert a row as the first child of `anchor`.
    AddRight { anchor: NodeId, row: Row },
    /// Insert a row directly after `anchor` in its sibling group.
    AddBelow { anchor: NodeId, row: Row },
    /// Insert a row directly before `anchor` in its sibling group.
    AddAbove { anchor: NodeId, row: Row },
    /// Remove `target` from its sibling group.
    Cut { target: NodeId },
}

impl LogEntry {
    pub fn add(row: Row) -> Self {
        LogEntry::Add { row }
    }

    pub fn add_right(anchor: impl Into<NodeId>, row: Row) -> Self {
        LogEntry::AddRight {
            anchor: anchor.into(),
            row,
        }
    }

    pub fn add_below(anchor: impl Into<NodeId>, row: Row) -> Self {
        LogEntry::AddBelow {
            anchor: anchor.into(),
            row,
        }
    }

    pub fn add_above(anchor: impl Into<NodeId>, row: Row) -> Self {
        LogEntry::AddAbove {
            anchor: anchor.into(),
            row,
        }
    }

    pub fn cut(target: impl Into<NodeId>) -> Self {
        LogEntry::Cut {
            target: target.into(),
        }
    }

    /// Row introduced by this entry, if it is an insert.
    pub fn row(&self) -> Option<&Row> {
        match self {
            LogEntry::Add { row }
            | LogEntry::AddRight { row, .. }
            | LogEntry::AddBelow { row, .. }
            | LogEntry::AddAbove { row, .. } => Some(row),
            LogEntry::Cut { .. } => None,
        }
    }

    /// Existing node this entry is positioned against.
    pub fn reference(&self) -> Option<&NodeId> {
        match self {
            LogEntry::Add { .. } => None,
            LogEntry::AddRight { anchor, .. }
            | LogEntry::AddBelow { anchor, .. }
            | LogEntry::AddAbove { anchor, .. } => Some(anchor),
            LogEntry::Cut { target } => Some(target),
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            LogEntry::Add { .. } => "add",
            LogEntry::AddRight { .. } => "add_right",
            LogEntry::AddBelow { .. } => "add_below",
            LogEntry::AddAbove { .. } => "add_above",
            LogEntry::Cut { .. } => "cut",
        }
    }
}
