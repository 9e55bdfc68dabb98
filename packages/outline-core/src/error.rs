use thiserror::Error;

use crate::ids::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("log entry {index}: anchor {anchor} is not in the tree")]
    MissingAnchor { index: usize, anchor: NodeId },
    #[error("log entry {index}: cut target {target} is not in the tree")]
    MissingTarget { index: usize, target: NodeId },
    #[error("log entry {index}: node id {id} is already in use")]
    DuplicateNode { index: usize, id: NodeId },
    #[error("inconsistent state: {0}")]
    InconsistentState(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Index of the log entry that was rejected, if the error came from replay.
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            Error::MissingAnchor { index, .. }
            | Error::MissingTarget { index, .. }
            | Error::DuplicateNode { index, .. } => Some(*index),
            Error::InconsistentState(_) | Error::Serialization(_) => None,
        }
    }
}
