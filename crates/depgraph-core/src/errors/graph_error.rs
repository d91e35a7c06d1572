//! Graph store errors. These are structural and propagate to the caller.

use super::error_code::{self, DepgraphErrorCode};

pub type GraphResult<T> = Result<T, GraphStoreError>;

#[derive(Debug, thiserror::Error)]
pub enum GraphStoreError {
    #[error("graph store unavailable: {0}")]
    Unavailable(String),

    #[error("graph inconsistency: {details}")]
    Inconsistent { details: String },

    #[error("graph lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("unknown node: {0}")]
    UnknownNode(String),
}

impl DepgraphErrorCode for GraphStoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned(_) => error_code::GRAPH_LOCK_POISONED,
            _ => error_code::GRAPH_STORE_ERROR,
        }
    }
}
