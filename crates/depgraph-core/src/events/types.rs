//! Event payload types.

use crate::types::{NodeRef, Relationship};

/// Payload for `on_aggregation_started`.
#[derive(Debug, Clone)]
pub struct AggregationStartedEvent {
    pub initial_todos: usize,
    pub cycle_participants: usize,
}

/// Payload for `on_pass_started`.
#[derive(Debug, Clone)]
pub struct PassStartedEvent {
    pub pass: usize,
    pub todos: usize,
}

/// Payload for `on_node_discovered`.
#[derive(Debug, Clone)]
pub struct NodeDiscoveredEvent {
    pub pass: usize,
    pub node: NodeRef,
    pub relationships: usize,
}

/// Payload for `on_node_missing`.
#[derive(Debug, Clone)]
pub struct NodeMissingEvent {
    pub pass: usize,
    pub node: NodeRef,
    pub reason: String,
}

/// Payload for `on_relationships_rejected`.
#[derive(Debug, Clone)]
pub struct RelationshipsRejectedEvent {
    pub pass: usize,
    pub rejected: Vec<Relationship>,
}

/// Payload for `on_pass_complete`.
#[derive(Debug, Clone)]
pub struct PassCompleteEvent {
    pub pass: usize,
    pub dispatched: usize,
    pub stored: usize,
    pub next_todos: usize,
}

/// Payload for `on_aggregation_complete`.
#[derive(Debug, Clone)]
pub struct AggregationCompleteEvent {
    pub passes: usize,
    pub missing: usize,
    pub interrupted: bool,
    pub duration_ms: u64,
}
