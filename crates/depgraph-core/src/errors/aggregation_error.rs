//! Hard failures of an aggregation run.

use super::error_code::{self, DepgraphErrorCode};
use super::{ConfigError, GraphStoreError};

/// Only structural failures surface here. Individual discovery failures
/// become "missing" nodes and an interrupted wait yields a partial report.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("Graph store error: {0}")]
    Graph(#[from] GraphStoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Worker pool error: {message}")]
    WorkerPool { message: String },
}

impl DepgraphErrorCode for AggregationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::WorkerPool { .. } => error_code::WORKER_POOL_ERROR,
        }
    }
}
