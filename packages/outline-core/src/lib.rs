#![forbid(unsafe_code)]
//! Event-sourced ordered tree for outline editing.
//!
//! Structural edits are appended to a [`Log`]; [`replay`] folds a log into a [`Snapshot`]
//! (the materialized forest, with 1-based contiguous orders per sibling group), and the
//! [`navigation`] queries answer what is adjacent to a row in that snapshot.

pub mod error;
pub mod ids;
pub mod log;
pub mod navigation;
pub mod node;
pub mod ops;
pub mod outline;
pub mod replay;
pub mod snapshot;

pub use error::{Error, Result};
pub use ids::{IdSupplier, NodeId, Row, SequentialIds};
pub use log::{log_add, log_add_above, log_add_below, log_add_right, log_cut, Log};
pub use navigation::{
    above, below, bottom, depth, first_right_of, last_right_of, parent_of, right_of,
    sibling_above, sibling_below, top,
};
pub use node::Node;
pub use ops::LogEntry;
pub use outline::Outline;
pub use replay::{
    replay, replay_prefix, replay_prefix_with, replay_with, CutPolicy, ReplayOptions, Replayer,
};
pub use snapshot::Snapshot;
