//! Positional queries over a [`Snapshot`], used to drive cursor movement.
//!
//! Every query is total: an unknown id, or the absence of the requested neighbour, gives
//! `None` (or an empty list), never an error. "Right" is the outline's indent direction,
//! so the nodes right of a row are its children.

use crate::ids::NodeId;
use crate::node::Node;
use crate::snapshot::Snapshot;

/// Children of `id`, ascending by order.
pub fn right_of<'a>(snapshot: &'a Snapshot, id: &NodeId) -> Vec<&'a Node> {
    snapshot.group(Some(id))
}

/// First child of `id`.
pub fn first_right_of<'a>(snapshot: &'a Snapshot, id: &NodeId) -> Option<&'a Node> {
    find_in_group(snapshot, Some(id), 1)
}

/// Last child of `id`.
pub fn last_right_of<'a>(snapshot: &'a Snapshot, id: &NodeId) -> Option<&'a Node> {
    snapshot
        .iter()
        .filter(|n| n.parent.as_ref() == Some(id))
        .max_by_key(|n| n.order)
}

pub fn sibling_above<'a>(snapshot: &'a Snapshot, id: &NodeId) -> Option<&'a Node> {
    let node = snapshot.get(id)?;
    if node.order <= 1 {
        return None;
    }
    find_in_group(snapshot, node.parent.as_ref(), node.order - 1)
}

pub fn sibling_below<'a>(snapshot: &'a Snapshot, id: &NodeId) -> Option<&'a Node> {
    let node = snapshot.get(id)?;
    find_in_group(snapshot, node.parent.as_ref(), node.order + 1)
}

/// First node of `id`'s sibling group; `id` itself when it already leads.
pub fn top<'a>(snapshot: &'a Snapshot, id: &NodeId) -> Option<&'a Node> {
    let node = snapshot.get(id)?;
    find_in_group(snapshot, node.parent.as_ref(), 1)
}

/// Last node of `id`'s sibling group; `id` itself when it already trails.
pub fn bottom<'a>(snapshot: &'a Snapshot, id: &NodeId) -> Option<&'a Node> {
    let node = snapshot.get(id)?;
    snapshot
        .iter()
        .filter(|n| n.is_sibling_of(node))
        .max_by_key(|n| n.order)
}

pub fn parent_of<'a>(snapshot: &'a Snapshot, id: &NodeId) -> Option<&'a Node> {
    let node = snapshot.get(id)?;
    snapshot.get(node.parent.as_ref()?)
}

/// Number of parent links above `id`; root-level rows are at depth 0.
///
/// A parent that was cut still counts as one level, and the walk stops there.
pub fn depth(snapshot: &Snapshot, id: &NodeId) -> Option<usize> {
    let mut current = snapshot.get(id)?;
    let mut depth = 0;
    while let Some(parent) = current.parent.as_ref() {
        depth += 1;
        match snapshot.get(parent) {
            Some(node) => current = node,
            None => break,
        }
    }
    Some(depth)
}

/// Document-order predecessor, for cursor-up.
///
/// With a sibling above, this is the deepest last descendant of that sibling (the sibling
/// itself when it has no children). Otherwise it is the parent. `None` for the first root,
/// and for the head of a group whose parent was cut.
pub fn above<'a>(snapshot: &'a Snapshot, id: &NodeId) -> Option<&'a Node> {
    let node = snapshot.get(id)?;
    match sibling_above(snapshot, id) {
        Some(sibling) => Some(deepest_last(snapshot, sibling)),
        None => snapshot.get(node.parent.as_ref()?),
    }
}

/// Document-order successor, for cursor-down.
///
/// The first child when there is one; otherwise the sibling below `id` or, failing that,
/// below its nearest ancestor that has one. `None` at the end of the document.
pub fn below<'a>(snapshot: &'a Snapshot, id: &NodeId) -> Option<&'a Node> {
    let node = snapshot.get(id)?;
    if let Some(child) = first_right_of(snapshot, id) {
        return Some(child);
    }
    let mut current = node;
    loop {
        if let Some(next) = sibling_below(snapshot, &current.id) {
            return Some(next);
        }
        current = snapshot.get(current.parent.as_ref()?)?;
    }
}

fn deepest_last<'a>(snapshot: &'a Snapshot, node: &'a Node) -> &'a Node {
    let mut current = node;
    while let Some(child) = last_right_of(snapshot, &current.id) {
        current = child;
    }
    current
}

fn find_in_group<'a>(
    snapshot: &'a Snapshot,
    parent: Option<&NodeId>,
    order: usize,
) -> Option<&'a Node> {
    snapshot
        .iter()
        .find(|n| n.parent.as_ref() == parent && n.order == order)
}
