//! Folding a [`Log`] into a [`Snapshot`].
//!
//! The accumulator keeps, per node, the ordered list of its children; a node's order is
//! its index in its parent's list plus one. Inserts and cuts edit those lists in place, so
//! the sibling shifts described by each entry fall out of the list operations and the
//! orders stay contiguous after every step.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::ids::{NodeId, Row};
use crate::log::Log;
use crate::node::Node;
use crate::ops::LogEntry;
use crate::snapshot::Snapshot;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What happens to the children of a node that is cut.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CutPolicy {
    /// Children stay in the snapshot under their cut parent. Each such group is laid out
    /// after the root-reachable forest, in the order the parents were cut.
    #[default]
    RetainDescendants,
    /// The whole subtree leaves the snapshot.
    RemoveDescendants,
}

/// Knobs for replay. The default reproduces the documented fold exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReplayOptions {
    pub cut_policy: CutPolicy,
}

impl ReplayOptions {
    pub fn cut_policy(mut self, policy: CutPolicy) -> Self {
        self.cut_policy = policy;
        self
    }
}

#[derive(Clone, Debug)]
struct NodeState {
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    tombstone: bool,
}

impl NodeState {
    fn new(label: String, parent: Option<NodeId>) -> Self {
        Self {
            label,
            parent,
            children: Vec::new(),
            tombstone: false,
        }
    }
}

/// Incremental replay accumulator.
///
/// Applying the entries of a log one at a time and then calling [`Replayer::snapshot`] gives
/// the same result as [`replay`] on that log.
#[derive(Clone, Debug, Default)]
pub struct Replayer {
    options: ReplayOptions,
    roots: Vec<NodeId>,
    // cut nodes stay here as tombstones so their ids are never reused
    nodes: HashMap<NodeId, NodeState>,
    detached: Vec<NodeId>,
    applied: usize,
}

impl Replayer {
    pub fn new(options: ReplayOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> ReplayOptions {
        self.options
    }

    /// Number of entries folded so far.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Whether `id` is a live node in the current state.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| !n.tombstone)
    }

    /// Fold one entry. A rejected entry leaves the state untouched.
    pub fn apply(&mut self, entry: &LogEntry) -> Result<()> {
        let index = self.applied;
        trace!(index, kind = entry.kind(), "fold log entry");
        if let Err(err) = self.check(index, entry) {
            warn!(index, kind = entry.kind(), error = %err, "rejected log entry");
            return Err(err);
        }
        match entry {
            LogEntry::Add { row } => self.apply_add(row),
            LogEntry::AddRight { anchor, row } => self.apply_add_right(anchor, row),
            LogEntry::AddBelow { anchor, row } => self.apply_add_beside(index, anchor, row, 1)?,
            LogEntry::AddAbove { anchor, row } => self.apply_add_beside(index, anchor, row, 0)?,
            LogEntry::Cut { target } => self.apply_cut(index, target)?,
        }
        self.applied += 1;
        Ok(())
    }

    /// Lay the current state out breadth-first.
    pub fn snapshot(&self) -> Snapshot {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.layout_from(None, &mut out);
        for cut in &self.detached {
            self.layout_from(Some(cut), &mut out);
        }
        Snapshot::from_nodes(out)
    }

    fn check(&self, index: usize, entry: &LogEntry) -> Result<()> {
        if let Some(row) = entry.row() {
            if self.nodes.contains_key(&row.id) {
                return Err(Error::DuplicateNode {
                    index,
                    id: row.id.clone(),
                });
            }
        }
        let Some(reference) = entry.reference() else {
            return Ok(());
        };
        if self.contains(reference) {
            return Ok(());
        }
        Err(match entry {
            LogEntry::Cut { .. } => Error::MissingTarget {
                index,
                target: reference.clone(),
            },
            _ => Error::MissingAnchor {
                index,
                anchor: reference.clone(),
            },
        })
    }

    fn apply_add(&mut self, row: &Row) {
        self.roots.push(row.id.clone());
        self.nodes
            .insert(row.id.clone(), NodeState::new(row.label.clone(), None));
    }

    fn apply_add_right(&mut self, anchor: &NodeId, row: &Row) {
        if let Some(parent) = self.nodes.get_mut(anchor) {
            parent.children.insert(0, row.id.clone());
        }
        self.nodes.insert(
            row.id.clone(),
            NodeState::new(row.label.clone(), Some(anchor.clone())),
        );
    }

    /// Insert next to `anchor`; `offset` 0 puts the row above it, 1 below it.
    fn apply_add_beside(
        &mut self,
        index: usize,
        anchor: &NodeId,
        row: &Row,
        offset: usize,
    ) -> Result<()> {
        let parent = self.parent_of(anchor);
        let group = self.group_mut(index, parent.as_ref())?;
        let pos = position_in(index, group, anchor)?;
        group.insert(pos + offset, row.id.clone());
        self.nodes
            .insert(row.id.clone(), NodeState::new(row.label.clone(), parent));
        Ok(())
    }

    fn apply_cut(&mut self, index: usize, target: &NodeId) -> Result<()> {
        let parent = self.parent_of(target);
        let group = self.group_mut(index, parent.as_ref())?;
        let pos = position_in(index, group, target)?;
        group.remove(pos);

        match self.options.cut_policy {
            CutPolicy::RetainDescendants => {
                self.tombstone(target);
                self.detached.push(target.clone());
            }
            CutPolicy::RemoveDescendants => {
                let mut stack = vec![target.clone()];
                while let Some(id) = stack.pop() {
                    if let Some(state) = self.nodes.get(&id) {
                        stack.extend(state.children.iter().cloned());
                    }
                    self.tombstone(&id);
                }
            }
        }
        Ok(())
    }

    fn tombstone(&mut self, id: &NodeId) {
        if let Some(state) = self.nodes.get_mut(id) {
            state.tombstone = true;
        }
    }

    fn parent_of(&self, id: &NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent.clone())
    }

    fn group_mut(&mut self, index: usize, parent: Option<&NodeId>) -> Result<&mut Vec<NodeId>> {
        match parent {
            None => Ok(&mut self.roots),
            Some(p) => self
                .nodes
                .get_mut(p)
                .map(|state| &mut state.children)
                .ok_or_else(|| {
                    Error::InconsistentState(format!(
                        "log entry {index}: parent {p} missing from accumulator"
                    ))
                }),
        }
    }

    fn children(&self, parent: Option<&NodeId>) -> &[NodeId] {
        match parent {
            None => &self.roots,
            Some(p) => self
                .nodes
                .get(p)
                .map(|state| state.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    fn layout_from(&self, start: Option<&NodeId>, out: &mut Vec<Node>) {
        let mut queue: VecDeque<Option<&NodeId>> = VecDeque::new();
        queue.push_back(start);
        while let Some(parent) = queue.pop_front() {
            for (i, id) in self.children(parent).iter().enumerate() {
                let Some(state) = self.nodes.get(id) else {
                    continue;
                };
                out.push(Node {
                    id: id.clone(),
                    label: state.label.clone(),
                    order: i + 1,
                    parent: parent.cloned(),
                });
                queue.push_back(Some(id));
            }
        }
    }
}

fn position_in(index: usize, group: &[NodeId], id: &NodeId) -> Result<usize> {
    group.iter().position(|c| c == id).ok_or_else(|| {
        Error::InconsistentState(format!(
            "log entry {index}: {id} missing from its sibling group"
        ))
    })
}

/// Replay `log` with default options.
pub fn replay(log: &Log) -> Result<Snapshot> {
    replay_with(log, ReplayOptions::default())
}

pub fn replay_with(log: &Log, options: ReplayOptions) -> Result<Snapshot> {
    fold(log.iter(), options)
}

/// Replay only the first `len` entries: the state as it was at that point in history.
pub fn replay_prefix(log: &Log, len: usize) -> Result<Snapshot> {
    replay_prefix_with(log, len, ReplayOptions::default())
}

pub fn replay_prefix_with(log: &Log, len: usize, options: ReplayOptions) -> Result<Snapshot> {
    fold(log.iter().take(len), options)
}

fn fold<'a>(
    entries: impl Iterator<Item = &'a LogEntry>,
    options: ReplayOptions,
) -> Result<Snapshot> {
    let mut replayer = Replayer::new(options);
    for entry in entries {
        replayer.apply(entry)?;
    }
    let snapshot = replayer.snapshot();
    debug!(
        entries = replayer.applied(),
        nodes = snapshot.len(),
        "replayed log"
    );
    Ok(snapshot)
}
