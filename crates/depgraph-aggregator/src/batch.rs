//! Batch dispatch and the per-pass barrier.

use crossbeam_channel::RecvTimeoutError;
use depgraph_core::errors::AggregationError;
use depgraph_core::traits::Cancellable;
use tracing::{error, trace};

use crate::pool::WorkerPool;
use crate::task::DiscoveryTask;
use crate::work_item::WorkItem;

/// Result of waiting on one batch.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Every task reported. Items are in task index order.
    Complete(Vec<WorkItem>),
    /// The wait was cancelled after `completed` items arrived.
    Interrupted { completed: usize },
}

/// Dispatch `tasks` to `pool` and block until each has reported, or until
/// `cancel` fires. Cancelled batches keep running; their results are dropped.
pub fn run_batch<C>(
    pool: &WorkerPool,
    tasks: Vec<DiscoveryTask>,
    cancel: &C,
) -> Result<BatchOutcome, AggregationError>
where
    C: Cancellable + ?Sized,
{
    let expected = tasks.len();
    if expected == 0 {
        return Ok(BatchOutcome::Complete(Vec::new()));
    }

    // One slot per task: a late send after cancellation never blocks a worker.
    let (tx, rx) = crossbeam_channel::bounded(expected);
    for task in tasks {
        let tx = tx.clone();
        pool.spawn(move || task.run(tx));
    }
    drop(tx);

    let mut items = Vec::with_capacity(expected);
    while items.len() < expected {
        if cancel.is_cancelled() {
            error!(completed = items.len(), expected, "interrupted on subgraph discovery");
            return Ok(BatchOutcome::Interrupted {
                completed: items.len(),
            });
        }
        match rx.recv_timeout(pool.cancel_poll()) {
            Ok(item) => {
                trace!(index = item.index, node = %item.todo.node, "task reported");
                items.push(item);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                return Err(AggregationError::WorkerPool {
                    message: format!(
                        "batch channel closed after {} of {expected} results",
                        items.len()
                    ),
                });
            }
        }
    }

    items.sort_by_key(|item| item.index);
    Ok(BatchOutcome::Complete(items))
}
