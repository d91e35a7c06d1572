//! `DepgraphErrorCode`: stable machine-readable codes for every error enum.

/// Every error enum implements this to expose a structured code string
/// to callers that marshal errors across process boundaries.
pub trait DepgraphErrorCode {
    /// Returns the error code string (e.g., "DISCOVERY_FAILED").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const DISCOVERY_FAILED: &str = "DISCOVERY_FAILED";
pub const INVALID_VERSION_SPEC: &str = "INVALID_VERSION_SPEC";
pub const DISCOVERY_IO: &str = "DISCOVERY_IO";
pub const GRAPH_STORE_ERROR: &str = "GRAPH_STORE_ERROR";
pub const GRAPH_LOCK_POISONED: &str = "GRAPH_LOCK_POISONED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const WORKER_POOL_ERROR: &str = "WORKER_POOL_ERROR";
