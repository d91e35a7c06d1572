//! DiscoveryTask: discovery of one node on a worker thread.

use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crossbeam_channel::Sender;
use depgraph_core::config::DiscoveryConfig;
use depgraph_core::traits::Discoverer;
use depgraph_core::types::NodeRef;
use tracing::{debug, error, info};

use crate::patch::PatcherRegistry;
use crate::todo::DiscoveryTodo;
use crate::work_item::{TaskOutcome, WorkItem};

/// Sends the task's work item when dropped, so every task reports exactly
/// once whether it finished, failed, or unwound.
pub struct CompletionSignal {
    sender: Sender<WorkItem>,
    index: usize,
    todo: Option<DiscoveryTodo>,
    outcome: Option<TaskOutcome>,
}

impl CompletionSignal {
    pub fn new(sender: Sender<WorkItem>, index: usize, todo: DiscoveryTodo) -> Self {
        Self {
            sender,
            index,
            todo: Some(todo),
            outcome: None,
        }
    }

    /// Record the outcome and signal.
    pub fn complete(mut self, outcome: TaskOutcome) {
        self.outcome = Some(outcome);
    }
}

impl Drop for CompletionSignal {
    fn drop(&mut self) {
        let Some(todo) = self.todo.take() else {
            return;
        };
        let item = WorkItem {
            index: self.index,
            todo,
            outcome: self.outcome.take().unwrap_or(TaskOutcome::Aborted),
        };
        // The controller may have stopped listening after a cancellation.
        if self.sender.send(item).is_err() {
            debug!(index = self.index, "batch receiver gone, discarding result");
        }
    }
}

/// Discovery of one todo. Reads only shared, immutable inputs.
pub struct DiscoveryTask {
    pass: usize,
    index: usize,
    todo: DiscoveryTodo,
    missing: Arc<BTreeSet<NodeRef>>,
    discoverer: Option<Arc<dyn Discoverer>>,
    patchers: Arc<PatcherRegistry>,
    config: Arc<DiscoveryConfig>,
}

impl DiscoveryTask {
    pub fn new(
        pass: usize,
        index: usize,
        todo: DiscoveryTodo,
        missing: Arc<BTreeSet<NodeRef>>,
        discoverer: Option<Arc<dyn Discoverer>>,
        patchers: Arc<PatcherRegistry>,
        config: Arc<DiscoveryConfig>,
    ) -> Self {
        Self {
            pass,
            index,
            todo,
            missing,
            discoverer,
            patchers,
            config,
        }
    }

    /// The ref this task will discover.
    pub fn node(&self) -> &NodeRef {
        &self.todo.node
    }

    /// Run the task and report through `sender`. Never unwinds.
    pub fn run(self, sender: Sender<WorkItem>) {
        let signal = CompletionSignal::new(sender, self.index, self.todo.clone());
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.execute())).unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            error!(
                pass = self.pass,
                index = self.index,
                node = %self.todo.node,
                panic = %message,
                "discoverer panicked"
            );
            TaskOutcome::Panicked(message)
        });
        signal.complete(outcome);
    }

    /// Discover the node on the current thread.
    pub fn execute(&self) -> TaskOutcome {
        let node = &self.todo.node;
        info!(pass = self.pass, index = self.index, node = %node, "processing missing node");

        if self.missing.contains(node) {
            info!(pass = self.pass, index = self.index, node = %node, "already marked as missing");
            return TaskOutcome::SkippedMissing;
        }
        let Some(discoverer) = self.discoverer.as_ref() else {
            info!(node = %node, "no discoverer, skipping");
            return TaskOutcome::NoDiscoverer;
        };

        match discoverer.discover_relationships(node, &self.config, self.config.store_directly()) {
            Ok(Some(mut result)) => {
                self.patchers.apply(&mut result, &self.config);
                TaskOutcome::Discovered(result)
            }
            Ok(None) => {
                info!(pass = self.pass, index = self.index, node = %node, "not found");
                TaskOutcome::NotFound
            }
            Err(e) => {
                error!(
                    pass = self.pass,
                    index = self.index,
                    node = %node,
                    error = %e,
                    "failed to discover subgraph"
                );
                TaskOutcome::Failed {
                    selected: e.selected().cloned(),
                    message: e.to_string(),
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use depgraph_core::errors::DiscoveryError;
    use depgraph_core::filter::FilterSet;
    use depgraph_core::models::DiscoveryResult;

    use super::*;

    struct Exploding;

    impl Discoverer for Exploding {
        fn discover_relationships(
            &self,
            _node: &NodeRef,
            _config: &DiscoveryConfig,
            _store_directly: bool,
        ) -> Result<Option<DiscoveryResult>, DiscoveryError> {
            panic!("boom");
        }
    }

    fn task(discoverer: Option<Arc<dyn Discoverer>>, missing: BTreeSet<NodeRef>) -> DiscoveryTask {
        DiscoveryTask::new(
            0,
            3,
            DiscoveryTodo::new(NodeRef::new("g", "a", "1"), FilterSet::new()),
            Arc::new(missing),
            discoverer,
            Arc::new(PatcherRegistry::new()),
            Arc::new(DiscoveryConfig::default()),
        )
    }

    #[test]
    fn panic_is_contained_and_signaled() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        task(Some(Arc::new(Exploding)), BTreeSet::new()).run(tx);
        let item = rx.try_recv().unwrap();
        assert_eq!(item.index, 3);
        assert!(matches!(item.outcome, TaskOutcome::Panicked(ref m) if m == "boom"));
    }

    #[test]
    fn missing_node_is_skipped_but_still_signals() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let missing = [NodeRef::new("g", "a", "1")].into_iter().collect();
        task(Some(Arc::new(Exploding)), missing).run(tx);
        assert!(matches!(rx.try_recv().unwrap().outcome, TaskOutcome::SkippedMissing));
    }

    #[test]
    fn dropped_signal_reports_aborted() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let todo = DiscoveryTodo::new(NodeRef::new("g", "a", "1"), FilterSet::new());
        drop(CompletionSignal::new(tx, 0, todo));
        assert!(matches!(rx.try_recv().unwrap().outcome, TaskOutcome::Aborted));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn no_discoverer_outcome() {
        let (tx, rx) = crossbeam_channel::bounded(1);
        task(None, BTreeSet::new()).run(tx);
        assert!(matches!(rx.try_recv().unwrap().outcome, TaskOutcome::NoDiscoverer));
    }
}
