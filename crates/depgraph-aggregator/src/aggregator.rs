//! GraphAggregator: the pass loop.

use std::sync::Arc;
use std::time::Instant;

use depgraph_core::config::{AggregationOptions, DiscoveryConfig};
use depgraph_core::errors::AggregationError;
use depgraph_core::events::{
    AggregationCompleteEvent, AggregationEventHandler, AggregationStartedEvent, EventDispatcher,
    NodeDiscoveredEvent, NodeMissingEvent, PassCompleteEvent, PassStartedEvent,
    RelationshipsRejectedEvent,
};
use depgraph_core::traits::{Cancellable, Discoverer, GraphStore};
use depgraph_core::types::Relationship;
use tracing::{debug, info, warn};

use crate::batch::{self, BatchOutcome};
use crate::fold;
use crate::patch::PatcherRegistry;
use crate::pool::WorkerPool;
use crate::report::AggregationReport;
use crate::seed;
use crate::state::RunState;
use crate::task::DiscoveryTask;
use crate::todo::DiscoveryTodo;

/// Completes a graph by discovering its incomplete nodes pass by pass.
///
/// Each pass dispatches one task per pending node and waits for all of them
/// before folding; pass N+1 never overlaps pass N. A node is attempted at
/// most once per run, so the loop terminates on any finite node universe.
/// Filters reaching a node after its attempt are dropped.
pub struct GraphAggregator {
    discoverer: Option<Arc<dyn Discoverer>>,
    patchers: Arc<PatcherRegistry>,
    events: EventDispatcher,
}

impl GraphAggregator {
    /// An aggregator discovering through `discoverer`, with the default
    /// patchers and no event handlers.
    pub fn new(discoverer: Arc<dyn Discoverer>) -> Self {
        Self {
            discoverer: Some(discoverer),
            patchers: Arc::new(PatcherRegistry::with_defaults()),
            events: EventDispatcher::new(),
        }
    }

    /// An aggregator with no discoverer: every pending node ends up missing.
    pub fn without_discoverer() -> Self {
        Self {
            discoverer: None,
            patchers: Arc::new(PatcherRegistry::with_defaults()),
            events: EventDispatcher::new(),
        }
    }

    /// Replace the patcher registry. Patchers still run only when enabled in
    /// the discovery config.
    pub fn with_patchers(mut self, patchers: PatcherRegistry) -> Self {
        self.patchers = Arc::new(patchers);
        self
    }

    /// Register a handler for pass and node events. Handler panics are
    /// caught and logged.
    pub fn with_event_handler(mut self, handler: Arc<dyn AggregationEventHandler>) -> Self {
        self.events.register(handler);
        self
    }

    pub fn has_discoverer(&self) -> bool {
        self.discoverer.is_some()
    }

    /// Discover and connect every incomplete node of `graph` reachable under
    /// its top filter, mutating the graph in place.
    ///
    /// Only graph store failures are errors. Discovery failures mark nodes
    /// missing, and a cancelled wait ends the run with `interrupted` set.
    pub fn aggregate<G, C>(
        &self,
        graph: &G,
        options: &AggregationOptions,
        pool: &WorkerPool,
        cancel: &C,
    ) -> Result<AggregationReport, AggregationError>
    where
        G: GraphStore + ?Sized,
        C: Cancellable + ?Sized,
    {
        if !options.discovery_enabled() {
            info!("discovery disabled, leaving graph unchanged");
            return Ok(AggregationReport::disabled());
        }

        let started = Instant::now();
        let mut report = AggregationReport::default();

        debug!("loading existing cycle participants");
        let mut state = RunState::new(seed::load_cycle_participants(graph)?);
        debug!("loading initial set of nodes to resolve");
        let mut pending = seed::load_initial_pending(graph)?;

        info!(
            todos = pending.len(),
            cycle_participants = state.cycle_participants.len(),
            threads = pool.threads(),
            "aggregation started"
        );
        self.events.emit_aggregation_started(&AggregationStartedEvent {
            initial_todos: pending.len(),
            cycle_participants: state.cycle_participants.len(),
        });

        let config = Arc::new(options.discovery_config().clone());
        let mut pass = 0;

        while !pending.is_empty() {
            let current = std::mem::take(&mut pending).into_todos();
            state.mark_done(current.iter().map(|todo| todo.node.clone()));
            report.passes += 1;

            info!(pass, todos = current.len(), "next batch of todos");
            self.events.emit_pass_started(&PassStartedEvent {
                pass,
                todos: current.len(),
            });

            let tasks = self.plan_tasks(pass, current, graph, &state, &config)?;
            let dispatched = tasks.len();
            report.dispatched += dispatched;

            let items = match batch::run_batch(pool, tasks, cancel)? {
                BatchOutcome::Complete(items) => items,
                BatchOutcome::Interrupted { completed } => {
                    warn!(pass, completed, dispatched, "aggregation interrupted, returning partial graph");
                    report.interrupted = true;
                    break;
                }
            };

            let folded = fold::fold_results(pass, &items, graph, &mut state, options.discovery_source())?;

            for (node, relationships) in &folded.discovered {
                self.events.emit_node_discovered(&NodeDiscoveredEvent {
                    pass,
                    node: node.clone(),
                    relationships: *relationships,
                });
            }
            for (node, reason) in &folded.missing {
                self.events.emit_node_missing(&NodeMissingEvent {
                    pass,
                    node: node.clone(),
                    reason: reason.clone(),
                });
            }
            report.discovered += folded.discovered.len();

            let mut stored = 0;
            if !folded.relationships.is_empty() {
                let rels: Vec<_> = folded.relationships.into_iter().collect();
                info!(pass, relationships = rels.len(), "storing relationships");
                let rejected = graph.store_relationships(&rels)?;
                stored = stored_edge_count(&rels, rejected.len());
                report.relationships_stored += stored;

                if !rejected.is_empty() {
                    info!(pass, rejected = rejected.len(), "marking rejected relationships as cycle participants");
                    report.relationships_rejected += rejected.len();
                    state.add_rejected(&rejected);
                    self.events
                        .emit_relationships_rejected(&RelationshipsRejectedEvent { pass, rejected });
                }
            }

            let mut next = folded.targets;
            next.remove_done(&state.done);
            info!(pass, todos = next.len(), missing = state.missing.len(), "uncovered new batch of todos");
            self.events.emit_pass_complete(&PassCompleteEvent {
                pass,
                dispatched,
                stored,
                next_todos: next.len(),
            });

            pending = next;
            pass += 1;
        }

        report.missing = state.missing;
        report.cycle_participants = state.cycle_participants;
        report.elapsed = started.elapsed();

        info!(
            passes = report.passes,
            dispatched = report.dispatched,
            stored = report.relationships_stored,
            rejected = report.relationships_rejected,
            missing = report.missing.len(),
            interrupted = report.interrupted,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "aggregation complete"
        );
        self.events.emit_aggregation_complete(&AggregationCompleteEvent {
            passes: report.passes,
            missing: report.missing.len(),
            interrupted: report.interrupted,
            duration_ms: report.elapsed.as_millis() as u64,
        });

        Ok(report)
    }

    /// One task per todo that is not missing, a cycle participant, or
    /// already present in the graph.
    fn plan_tasks<G>(
        &self,
        pass: usize,
        todos: Vec<DiscoveryTodo>,
        graph: &G,
        state: &RunState,
        config: &Arc<DiscoveryConfig>,
    ) -> Result<Vec<DiscoveryTask>, AggregationError>
    where
        G: GraphStore + ?Sized,
    {
        let missing = state.missing_snapshot();
        let mut tasks = Vec::with_capacity(todos.len());

        for (index, todo) in todos.into_iter().enumerate() {
            if let Some(reason) = state.skip_reason(&todo.node, graph)? {
                info!(pass, index, node = %todo.node, reason = %reason, "skipping reference");
                continue;
            }
            tasks.push(DiscoveryTask::new(
                pass,
                index,
                todo,
                Arc::clone(&missing),
                self.discoverer.clone(),
                Arc::clone(&self.patchers),
                Arc::clone(config),
            ));
        }
        Ok(tasks)
    }
}

/// Edges added by one store call. Terminal markers add no edge, and a store
/// reporting more rejections than it was given counts as storing nothing.
fn stored_edge_count(submitted: &[Relationship], rejected: usize) -> usize {
    submitted
        .iter()
        .filter(|rel| !rel.is_terminal())
        .count()
        .saturating_sub(rejected)
}

impl std::fmt::Debug for GraphAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphAggregator")
            .field("has_discoverer", &self.discoverer.is_some())
            .field("patchers", &self.patchers)
            .field("handlers", &self.events.handler_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use depgraph_core::types::NodeRef;

    use super::*;

    fn n(name: &str) -> NodeRef {
        NodeRef::new("g", name, "1")
    }

    #[test]
    fn terminal_markers_are_not_counted_as_stored_edges() {
        let rels = [
            Relationship::dependency(n("a"), n("b")),
            Relationship::terminal_parent("test", n("c")),
        ];
        assert_eq!(stored_edge_count(&rels, 0), 1);
    }

    #[test]
    fn over_reported_rejections_do_not_underflow() {
        let rels = [Relationship::dependency(n("a"), n("b"))];
        assert_eq!(stored_edge_count(&rels, 3), 0);
    }
}
