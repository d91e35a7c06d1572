//! EventDispatcher: synchronous event dispatch, near-free when empty.

use std::sync::Arc;

use super::handler::AggregationEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn AggregationEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn AggregationEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers. A panicking handler is
    /// logged and does not stop later handlers from receiving the event.
    fn emit<F: Fn(&dyn AggregationEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("aggregation event handler panicked");
            }
        }
    }

    pub fn emit_aggregation_started(&self, event: &AggregationStartedEvent) {
        self.emit(|h| h.on_aggregation_started(event));
    }

    pub fn emit_pass_started(&self, event: &PassStartedEvent) {
        self.emit(|h| h.on_pass_started(event));
    }

    pub fn emit_node_discovered(&self, event: &NodeDiscoveredEvent) {
        self.emit(|h| h.on_node_discovered(event));
    }

    pub fn emit_node_missing(&self, event: &NodeMissingEvent) {
        self.emit(|h| h.on_node_missing(event));
    }

    pub fn emit_relationships_rejected(&self, event: &RelationshipsRejectedEvent) {
        self.emit(|h| h.on_relationships_rejected(event));
    }

    pub fn emit_pass_complete(&self, event: &PassCompleteEvent) {
        self.emit(|h| h.on_pass_complete(event));
    }

    pub fn emit_aggregation_complete(&self, event: &AggregationCompleteEvent) {
        self.emit(|h| h.on_aggregation_complete(event));
    }
}
