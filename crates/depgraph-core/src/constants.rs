//! Shared constants for the depgraph aggregation engine.

/// depgraph version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of discovery worker threads.
pub const DEFAULT_WORKER_THREADS: usize = 8;

/// How often (ms) the batch barrier re-checks the cancellation token.
pub const DEFAULT_CANCEL_POLL_MS: u64 = 25;

/// Whether discovery runs when nothing is configured.
pub const DEFAULT_DISCOVERY_ENABLED: bool = true;

/// Source recorded on synthesized terminal relationships.
pub const DEFAULT_DISCOVERY_SOURCE: &str = "depgraph:aggregator";

/// Default per-node discovery timeout passed through to discoverers (seconds).
pub const DEFAULT_DISCOVERY_TIMEOUT_SECS: u64 = 60;

/// Project-level config file name.
pub const CONFIG_FILE_NAME: &str = "depgraph.toml";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "DEPGRAPH_LOG";

/// Thread name prefix for discovery workers.
pub const WORKER_THREAD_PREFIX: &str = "depgraph-discovery";
