//! Worker pool configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PoolConfig {
    /// Discovery worker threads. Default: 8.
    pub worker_threads: Option<usize>,
    /// Barrier cancellation poll interval in milliseconds. Default: 25.
    pub cancel_poll_ms: Option<u64>,
}

impl PoolConfig {
    pub fn with_threads(threads: usize) -> Self {
        Self {
            worker_threads: Some(threads),
            ..Default::default()
        }
    }

    /// Reject explicit zero values; a pool needs at least one thread and a
    /// positive poll interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "pool.worker_threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.cancel_poll_ms == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "pool.cancel_poll_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn effective_worker_threads(&self) -> usize {
        self.worker_threads
            .unwrap_or(constants::DEFAULT_WORKER_THREADS)
    }

    pub fn effective_cancel_poll(&self) -> Duration {
        Duration::from_millis(
            self.cancel_poll_ms
                .unwrap_or(constants::DEFAULT_CANCEL_POLL_MS),
        )
    }
}
