//! Shared fixtures for outline-core integration suites.

use std::collections::HashMap;

use outline_core::{
    CutPolicy, IdSupplier, Log, LogEntry, Node, NodeId, Row, SequentialIds, Snapshot,
};

/// Row whose label mirrors its id, for compact assertions.
pub fn row(id: &str) -> Row {
    Row::new(id, id)
}

/// Row factory handing out unique ids, like an editor's id supplier would.
#[derive(Default)]
pub struct Rows {
    ids: SequentialIds,
}

impl Rows {
    pub fn new(prefix: &str) -> Self {
        Self {
            ids: SequentialIds::new(prefix),
        }
    }

    pub fn next(&mut self, label: &str) -> Row {
        self.ids.row(label)
    }
}

/// Expected snapshot record.
pub fn node(row: &Row, order: usize, parent: Option<&Row>) -> Node {
    Node {
        id: row.id.clone(),
        label: row.label.clone(),
        order,
        parent: parent.map(|p| p.id.clone()),
    }
}

/// `(id, order, parent)` triples in snapshot sequence order.
pub fn shape(snapshot: &Snapshot) -> Vec<(String, usize, Option<String>)> {
    snapshot
        .iter()
        .map(|n| {
            (
                n.id.to_string(),
                n.order,
                n.parent.as_ref().map(NodeId::to_string),
            )
        })
        .collect()
}

/// Panic with the offending snapshot if any invariant is broken.
pub fn assert_invariants(snapshot: &Snapshot) {
    if let Err(err) = snapshot.validate_invariants() {
        panic!("{err}\nsnapshot: {:#?}", snapshot.as_slice());
    }
}

/// Two roots, the first with two children:
///
/// ```text
/// root
///   child
///   child2
/// foo
/// ```
///
/// Built the way the outline editor records it: `foo` below `root`, then `child` right of
/// `root`, then `child2` below `child`. Returns the rows as `[root, child, child2, foo]`.
pub fn two_level_log() -> (Log, [Row; 4]) {
    let root = row("root");
    let child = row("child");
    let child2 = row("child2");
    let foo = row("foo");
    let log = Log::new()
        .add(root.clone())
        .add_below(root.id.clone(), foo.clone())
        .add_right(root.id.clone(), child.clone())
        .add_below(child.id.clone(), child2.clone());
    (log, [root, child, child2, foo])
}

/// Edit steps decoded from arbitrary `(selector, pick)` pairs into a log that always replays
/// under the default options. Cut rows leave the candidate set, their children stay.
pub fn log_from_steps(steps: &[(u8, usize)]) -> Log {
    log_from_steps_with(steps, CutPolicy::RetainDescendants)
}

/// Like [`log_from_steps`], but the anchors it picks stay valid under `policy`: with
/// [`CutPolicy::RemoveDescendants`] a cut takes the row's whole subtree out of the
/// candidate set.
pub fn log_from_steps_with(steps: &[(u8, usize)], policy: CutPolicy) -> Log {
    let mut rows = Rows::new("n");
    let mut live: Vec<NodeId> = Vec::new();
    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut log = Log::new();
    for &(selector, pick) in steps {
        if live.is_empty() || selector % 5 == 0 {
            let row = rows.next("add");
            live.push(row.id.clone());
            parents.insert(row.id.clone(), None);
            log = log.push(LogEntry::add(row));
            continue;
        }
        let idx = pick % live.len();
        let anchor = live[idx].clone();
        let sibling_parent = parents.get(&anchor).cloned().flatten();
        let (entry, parent) = match selector % 5 {
            1 => (
                LogEntry::add_right(anchor.clone(), rows.next("right")),
                Some(anchor),
            ),
            2 => (
                LogEntry::add_below(anchor, rows.next("below")),
                sibling_parent,
            ),
            3 => (
                LogEntry::add_above(anchor, rows.next("above")),
                sibling_parent,
            ),
            _ => {
                match policy {
                    CutPolicy::RetainDescendants => {
                        live.swap_remove(idx);
                    }
                    CutPolicy::RemoveDescendants => {
                        live.retain(|id| !descends_from(&parents, id, &anchor));
                    }
                }
                (LogEntry::cut(anchor), None)
            }
        };
        if let Some(row) = entry.row() {
            live.push(row.id.clone());
            parents.insert(row.id.clone(), parent);
        }
        log = log.push(entry);
    }
    log
}

/// Whether `id` is `ancestor` or sits somewhere below it.
fn descends_from(
    parents: &HashMap<NodeId, Option<NodeId>>,
    id: &NodeId,
    ancestor: &NodeId,
) -> bool {
    let mut current = Some(id);
    while let Some(node) = current {
        if node == ancestor {
            return true;
        }
        current = parents.get(node).and_then(|p| p.as_ref());
    }
    false
}
