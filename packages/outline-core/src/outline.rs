use std::cell::OnceCell;

use tracing::error;

use crate::error::Result;
use crate::ids::{NodeId, Row};
use crate::log::Log;
use crate::ops::LogEntry;
use crate::replay::{replay_prefix_with, ReplayOptions, Replayer};
use crate::snapshot::Snapshot;

/// Single-owner handle on the current log.
///
/// Edits are checked against the current state before they are appended, so the log held
/// here always replays cleanly. The snapshot is rebuilt lazily after each edit.
#[derive(Clone, Debug, Default)]
pub struct Outline {
    log: Log,
    replayer: Replayer,
    snapshot: OnceCell<Snapshot>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ReplayOptions) -> Self {
        Self {
            log: Log::new(),
            replayer: Replayer::new(options),
            snapshot: OnceCell::new(),
        }
    }

    /// Adopt an existing log, failing if it does not replay.
    pub fn from_log(log: Log, options: ReplayOptions) -> Result<Self> {
        let replayer = fold(&log, options)?;
        Ok(Self {
            log,
            replayer,
            snapshot: OnceCell::new(),
        })
    }

    pub fn add(&mut self, row: Row) -> Result<()> {
        self.commit(LogEntry::add(row))
    }

    pub fn add_right(&mut self, anchor: impl Into<NodeId>, row: Row) -> Result<()> {
        self.commit(LogEntry::add_right(anchor, row))
    }

    pub fn add_below(&mut self, anchor: impl Into<NodeId>, row: Row) -> Result<()> {
        self.commit(LogEntry::add_below(anchor, row))
    }

    pub fn add_above(&mut self, anchor: impl Into<NodeId>, row: Row) -> Result<()> {
        self.commit(LogEntry::add_above(anchor, row))
    }

    pub fn cut(&mut self, target: impl Into<NodeId>) -> Result<()> {
        self.commit(LogEntry::cut(target))
    }

    /// Fold `entry` into the current state and append it to the log.
    /// A rejected entry is not appended.
    pub fn commit(&mut self, entry: LogEntry) -> Result<()> {
        self.replayer.apply(&entry)?;
        self.log.append(entry);
        self.snapshot.take();
        Ok(())
    }

    /// Drop the most recent entry and refold what remains.
    pub fn undo(&mut self) -> Option<LogEntry> {
        let entry = self.log.pop()?;
        self.replayer = refold(&self.log, self.replayer.options());
        self.snapshot.take();
        Some(entry)
    }

    pub fn log(&self) -> &Log {
        &self.log
    }

    pub fn into_log(self) -> Log {
        self.log
    }

    pub fn options(&self) -> ReplayOptions {
        self.replayer.options()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.replayer.contains(id)
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.snapshot.get_or_init(|| self.replayer.snapshot())
    }

    /// State after the first `len` entries of the log.
    pub fn snapshot_at(&self, len: usize) -> Result<Snapshot> {
        replay_prefix_with(&self.log, len, self.replayer.options())
    }
}

fn fold(log: &Log, options: ReplayOptions) -> Result<Replayer> {
    let mut replayer = Replayer::new(options);
    for entry in log {
        replayer.apply(entry)?;
    }
    Ok(replayer)
}

/// Refold a log whose entries were all accepted by `commit`.
fn refold(log: &Log, options: ReplayOptions) -> Replayer {
    let mut replayer = Replayer::new(options);
    for entry in log {
        if let Err(err) = replayer.apply(entry) {
            error!(error = %err, "committed log no longer replays");
            break;
        }
    }
    replayer
}
