//! # depgraph-aggregator
//!
//! Incrementally completes a dependency graph. Each pass discovers every
//! pending node in parallel, waits for the whole batch, then folds the
//! results through the relationship filters to produce the next batch.
//! The loop ends when a pass yields no new work.

pub mod aggregator;
pub mod batch;
pub mod fold;
pub mod patch;
pub mod pool;
pub mod report;
pub mod seed;
pub mod state;
pub mod task;
pub mod todo;
pub mod work_item;

pub use aggregator::GraphAggregator;
pub use patch::{PatcherRegistry, SelfDependencyPatcher};
pub use pool::WorkerPool;
pub use report::AggregationReport;
pub use todo::{DiscoveryTodo, TodoSet};
pub use work_item::{TaskOutcome, WorkItem};
