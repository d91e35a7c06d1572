//! `RecordingHandler`: an event handler that keeps what it saw.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use depgraph_core::events::*;
use depgraph_core::types::NodeRef;

#[derive(Debug, Default)]
pub struct RecordingHandler {
    pub passes_started: AtomicUsize,
    pub passes_completed: AtomicUsize,
    pub discovered: AtomicUsize,
    pub rejected: AtomicUsize,
    pub completed: AtomicUsize,
    missing: Mutex<Vec<NodeRef>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing(&self) -> Vec<NodeRef> {
        self.missing.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::Relaxed)
    }
}

impl AggregationEventHandler for RecordingHandler {
    fn on_pass_started(&self, _event: &PassStartedEvent) {
        self.passes_started.fetch_add(1, Ordering::Relaxed);
    }

    fn on_node_discovered(&self, _event: &NodeDiscoveredEvent) {
        self.discovered.fetch_add(1, Ordering::Relaxed);
    }

    fn on_node_missing(&self, event: &NodeMissingEvent) {
        if let Ok(mut missing) = self.missing.lock() {
            missing.push(event.node.clone());
        }
    }

    fn on_relationships_rejected(&self, event: &RelationshipsRejectedEvent) {
        self.rejected.fetch_add(event.rejected.len(), Ordering::Relaxed);
    }

    fn on_pass_complete(&self, _event: &PassCompleteEvent) {
        self.passes_completed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_aggregation_complete(&self, _event: &AggregationCompleteEvent) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }
}
