//! WorkerPool: caller-owned thread pool for discovery tasks.

use std::time::Duration;

use depgraph_core::config::PoolConfig;
use depgraph_core::constants;
use depgraph_core::errors::AggregationError;

/// Bounded pool of discovery workers.
///
/// Owned by the caller and passed to every `aggregate` call; dropping it
/// lets queued tasks finish and then stops the threads.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    threads: usize,
    cancel_poll: Duration,
}

impl WorkerPool {
    /// Start a pool sized by `config`. Zero threads or a zero poll interval
    /// is a configuration error.
    pub fn new(config: &PoolConfig) -> Result<Self, AggregationError> {
        config.validate()?;
        let threads = config.effective_worker_threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("{}-{i}", constants::WORKER_THREAD_PREFIX))
            .build()
            .map_err(|e| AggregationError::WorkerPool {
                message: e.to_string(),
            })?;
        tracing::debug!(threads, "discovery worker pool started");
        Ok(Self {
            pool,
            threads,
            cancel_poll: config.effective_cancel_poll(),
        })
    }

    /// A pool of `threads` workers with the default poll interval.
    pub fn with_threads(threads: usize) -> Result<Self, AggregationError> {
        Self::new(&PoolConfig::with_threads(threads))
    }

    /// Worker thread count.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// How often a waiting controller re-checks cancellation.
    pub fn cancel_poll(&self) -> Duration {
        self.cancel_poll
    }

    pub(crate) fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pool.spawn(job);
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("threads", &self.threads)
            .field("cancel_poll", &self.cancel_poll)
            .finish()
    }
}
