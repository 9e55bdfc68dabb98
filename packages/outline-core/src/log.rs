//! The append-only edit log and the builders that grow it.
//!
//! Builders take the log by value and hand back the grown log. They only push one entry:
//! anchors are not looked up and no order is computed here, that is left to replay.

use crate::ids::{NodeId, Row};
use crate::ops::LogEntry;

#[cfg(feature = "serde")]
use crate::error::{Error, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered sequence of edits. Entries are never reordered or rewritten.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Log {
    entries: Vec<LogEntry>,
}

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.entries.iter()
    }

    /// The log as it stood after its first `len` entries.
    pub fn prefix(&self, len: usize) -> Log {
        let len = len.min(self.entries.len());
        Log {
            entries: self.entries[..len].to_vec(),
        }
    }

    /// Append an arbitrary entry.
    pub fn push(mut self, entry: LogEntry) -> Log {
        self.entries.push(entry);
        self
    }

    pub fn add(self, row: Row) -> Log {
        self.push(LogEntry::add(row))
    }

    pub fn add_right(self, anchor: impl Into<NodeId>, row: Row) -> Log {
        self.push(LogEntry::add_right(anchor, row))
    }

    pub fn add_below(self, anchor: impl Into<NodeId>, row: Row) -> Log {
        self.push(LogEntry::add_below(anchor, row))
    }

    pub fn add_above(self, anchor: impl Into<NodeId>, row: Row) -> Log {
        self.push(LogEntry::add_above(anchor, row))
    }

    pub fn cut(self, target: impl Into<NodeId>) -> Log {
        self.push(LogEntry::cut(target))
    }

    pub(crate) fn pop(&mut self) -> Option<LogEntry> {
        self.entries.pop()
    }

    pub(crate) fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}

#[cfg(feature = "serde")]
impl Log {
    /// Encode as JSON Lines, one entry per line.
    pub fn to_json_lines(&self) -> Result<String> {
        let mut out = String::new();
        for entry in &self.entries {
            let line =
                serde_json::to_string(entry).map_err(|e| Error::Serialization(e.to_string()))?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }

    /// Decode JSON Lines produced by [`Log::to_json_lines`]. Blank lines are skipped.
    pub fn from_json_lines(input: &str) -> Result<Log> {
        let mut entries = Vec::new();
        for (lineno, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let entry: LogEntry = serde_json::from_str(line)
                .map_err(|e| Error::Serialization(format!("line {}: {e}", lineno + 1)))?;
            entries.push(entry);
        }
        Ok(Log { entries })
    }
}

impl FromIterator<LogEntry> for Log {
    fn from_iter<I: IntoIterator<Item = LogEntry>>(iter: I) -> Self {
        Log {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Log {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

pub fn log_add(log: Log, row: Row) -> Log {
    log.add(row)
}

pub fn log_add_right(log: Log, anchor: impl Into<NodeId>, row: Row) -> Log {
    log.add_right(anchor, row)
}

pub fn log_add_below(log: Log, anchor: impl Into<NodeId>, row: Row) -> Log {
    log.add_below(anchor, row)
}

pub fn log_add_above(log: Log, anchor: impl Into<NodeId>, row: Row) -> Log {
    log.add_above(anchor, row)
}

pub fn log_cut(log: Log, target: impl Into<NodeId>) -> Log {
    log.cut(target)
}
