use outline_core::{
    bottom, first_right_of, log_add, log_add_above, log_add_below, log_add_right, log_cut,
    replay, replay_prefix, right_of, sibling_above, sibling_below, top, Log, NodeId, Snapshot,
};
use outline_test_support::{node, two_level_log, Rows};

#[test]
fn adding_a_child_nests_it_under_its_anchor() {
    let mut rows = Rows::new("r");
    let row1 = rows.next("root");
    let row2 = rows.next("foo");

    let log = Log::new()
        .add(row1.clone())
        .add_right(row1.id.clone(), row2.clone());

    let tree = replay(&log).unwrap();
    assert!(tree.contains(&row2.id));
    assert!(tree.as_slice()[0].is_root_level());
    assert_eq!(
        tree.as_slice(),
        &[node(&row1, 1, None), node(&row2, 1, Some(&row1))]
    );

    let right: Vec<_> = right_of(&tree, &row1.id).into_iter().cloned().collect();
    assert_eq!(right, vec![node(&row2, 1, Some(&row1))]);

    assert_eq!(
        first_right_of(&tree, &row1.id),
        Some(&node(&row2, 1, Some(&row1)))
    );
    assert!(right_of(&tree, &row2.id).is_empty());
    assert_eq!(first_right_of(&tree, &row2.id), None);
}

#[test]
fn cutting_a_child_only_renumbers_its_siblings() {
    let mut rows = Rows::new("r");
    let row1 = rows.next("./root");
    let row2 = rows.next("./root/child");
    let row3 = rows.next("./root/child2");
    let row4 = rows.next("./foo");

    let log = Log::new()
        .add(row1.clone())
        .add_right(row1.id.clone(), row2.clone())
        .add_below(row2.id.clone(), row3.clone())
        .add_below(row1.id.clone(), row4.clone());

    assert_eq!(
        replay(&log).unwrap().into_vec(),
        vec![
            node(&row1, 1, None),
            node(&row4, 2, None),
            node(&row2, 1, Some(&row1)),
            node(&row3, 2, Some(&row1)),
        ]
    );

    let log = log.cut(row2.id.clone());
    assert_eq!(
        replay(&log).unwrap().into_vec(),
        vec![
            node(&row1, 1, None),
            node(&row4, 2, None),
            node(&row3, 1, Some(&row1)),
        ]
    );
}

#[test]
fn builder_functions_record_the_same_log_as_methods() {
    let mut rows = Rows::new("r");
    let row1 = rows.next("./root");
    let row2 = rows.next("./root/child");
    let row3 = rows.next("./root/child2");
    let row4 = rows.next("./foo");
    let row5 = rows.next("./bar");

    let logs = log_add(Log::new(), row1.clone());
    let logs = log_add_right(logs, row1.id.clone(), row2.clone());
    let logs = log_add_below(logs, row2.id.clone(), row3.clone());
    let logs = log_add_below(logs, row1.id.clone(), row4.clone());
    let logs = log_add_above(logs, row4.id.clone(), row5.clone());
    let logs = log_cut(logs, row2.id.clone());

    let chained = Log::new()
        .add(row1.clone())
        .add_right(row1.id.clone(), row2.clone())
        .add_below(row2.id.clone(), row3.clone())
        .add_below(row1.id.clone(), row4.clone())
        .add_above(row4.id.clone(), row5.clone())
        .cut(row2.id.clone());
    assert_eq!(logs, chained);

    assert_eq!(
        replay(&logs).unwrap().into_vec(),
        vec![
            node(&row1, 1, None),
            node(&row5, 2, None),
            node(&row4, 3, None),
            node(&row3, 1, Some(&row1)),
        ]
    );
}

#[test]
fn log_prefix_rewinds_history() {
    let (log, [root, _, _, foo]) = two_level_log();
    let log = log.cut(foo.id.clone());

    let early = log.prefix(2);
    assert_eq!(early.len(), 2);
    assert_eq!(early.entries(), &log.entries()[..2]);
    assert_eq!(
        replay(&early).unwrap().into_vec(),
        vec![node(&root, 1, None), node(&foo, 2, None)]
    );
    assert_eq!(replay(&early).unwrap(), replay_prefix(&log, 2).unwrap());

    assert_eq!(log.prefix(log.len() + 10), log);
    assert!(log.prefix(0).is_empty());
}

fn assert_chain_up(tree: &Snapshot, [first, second, third]: [&NodeId; 3]) {
    assert_eq!(sibling_above(tree, third).map(|n| &n.id), Some(second));
    assert_eq!(sibling_above(tree, second).map(|n| &n.id), Some(first));
    assert_eq!(sibling_above(tree, first), None);
}

#[test]
fn repeated_add_right_reverses_insertion_order() {
    let mut rows = Rows::new("r");
    let root = rows.next("root");
    let child1 = rows.next("./root/child1");
    let child2 = rows.next("./root/child2");
    let child3 = rows.next("./root/child3");

    let log = Log::new()
        .add(root.clone())
        .add_right(root.id.clone(), child1.clone())
        .add_right(root.id.clone(), child2.clone())
        .add_right(root.id.clone(), child3.clone());

    let tree = replay(&log).unwrap();
    assert_chain_up(&tree, [&child3.id, &child2.id, &child1.id]);
    assert_eq!(
        first_right_of(&tree, &root.id).map(|n| &n.id),
        Some(&child3.id)
    );
}

#[test]
fn add_below_chain_keeps_insertion_order() {
    let mut rows = Rows::new("r");
    let root = rows.next("root");
    let child1 = rows.next("./root/child1");
    let child2 = rows.next("./root/child2");
    let child3 = rows.next("./root/child3");

    let log = Log::new()
        .add(root.clone())
        .add_right(root.id.clone(), child1.clone())
        .add_below(child1.id.clone(), child2.clone())
        .add_below(child2.id.clone(), child3.clone());

    let tree = replay(&log).unwrap();
    assert_chain_up(&tree, [&child1.id, &child2.id, &child3.id]);
}

#[test]
fn add_above_chain_builds_upwards() {
    let mut rows = Rows::new("r");
    let root = rows.next("root");
    let child1 = rows.next("./root/child1");
    let child2 = rows.next("./root/child2");
    let child3 = rows.next("./root/child3");

    let log = Log::new()
        .add(root.clone())
        .add_right(root.id.clone(), child3.clone())
        .add_above(child3.id.clone(), child2.clone())
        .add_above(child2.id.clone(), child1.clone());

    let tree = replay(&log).unwrap();
    assert_chain_up(&tree, [&child1.id, &child2.id, &child3.id]);
}

#[test]
fn top_of_current_group() {
    let (log, [root, child, child2, foo]) = two_level_log();
    let tree = replay(&log).unwrap();
    assert_eq!(top(&tree, &foo.id).map(|n| &n.id), Some(&root.id));
    assert_eq!(top(&tree, &child2.id).map(|n| &n.id), Some(&child.id));
    assert_eq!(top(&tree, &root.id).map(|n| &n.id), Some(&root.id));
}

#[test]
fn bottom_of_current_group() {
    let (log, [root, child, child2, foo]) = two_level_log();
    let tree = replay(&log).unwrap();
    assert_eq!(bottom(&tree, &root.id).map(|n| &n.id), Some(&foo.id));
    assert_eq!(bottom(&tree, &child.id).map(|n| &n.id), Some(&child2.id));
    assert_eq!(bottom(&tree, &child2.id).map(|n| &n.id), Some(&child2.id));
}

#[test]
fn sibling_above_for_parent_with_children() {
    let (log, [root, child, child2, foo]) = two_level_log();
    let tree = replay(&log).unwrap();
    assert_eq!(sibling_above(&tree, &root.id), None);
    assert_eq!(sibling_above(&tree, &child.id), None);
    assert_eq!(
        sibling_above(&tree, &child2.id).map(|n| &n.id),
        Some(&child.id)
    );
    assert_eq!(sibling_above(&tree, &foo.id).map(|n| &n.id), Some(&root.id));
}

#[test]
fn sibling_below_for_parent_with_children() {
    let (log, [root, child, child2, foo]) = two_level_log();
    let tree = replay(&log).unwrap();
    assert_eq!(sibling_below(&tree, &root.id).map(|n| &n.id), Some(&foo.id));
    assert_eq!(
        sibling_below(&tree, &child.id).map(|n| &n.id),
        Some(&child2.id)
    );
    assert_eq!(sibling_below(&tree, &child2.id), None);
    assert_eq!(sibling_below(&tree, &foo.id), None);
}
