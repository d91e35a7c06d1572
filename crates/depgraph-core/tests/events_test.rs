//! Tests for the aggregation event system.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use depgraph_core::events::*;
use depgraph_core::types::NodeRef;

#[derive(Default)]
struct CountingHandler {
    passes: AtomicUsize,
    missing: AtomicUsize,
}

impl AggregationEventHandler for CountingHandler {
    fn on_pass_started(&self, _event: &PassStartedEvent) {
        self.passes.fetch_add(1, Ordering::Relaxed);
    }

    fn on_node_missing(&self, _event: &NodeMissingEvent) {
        self.missing.fetch_add(1, Ordering::Relaxed);
    }
}

struct PanickingHandler;

impl AggregationEventHandler for PanickingHandler {
    fn on_pass_started(&self, _event: &PassStartedEvent) {
        panic!("handler failure");
    }
}

#[test]
fn empty_dispatcher_is_a_noop() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_pass_started(&PassStartedEvent { pass: 0, todos: 3 });
}

#[test]
fn dispatches_to_registered_handlers() {
    let handler = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(handler.clone());

    dispatcher.emit_pass_started(&PassStartedEvent { pass: 0, todos: 1 });
    dispatcher.emit_node_missing(&NodeMissingEvent {
        pass: 0,
        node: NodeRef::new("g", "a", "1"),
        reason: "not found".into(),
    });

    assert_eq!(handler.passes.load(Ordering::Relaxed), 1);
    assert_eq!(handler.missing.load(Ordering::Relaxed), 1);
}

#[test]
fn panicking_handler_does_not_block_others() {
    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_pass_started(&PassStartedEvent { pass: 1, todos: 2 });
    assert_eq!(counter.passes.load(Ordering::Relaxed), 1);
}
