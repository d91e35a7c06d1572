//! `AggregationEventHandler` trait, all methods with no-op defaults.

use super::types::*;

/// Observer of aggregation runs.
///
/// Handlers only override the events they care about. Events are emitted
/// from the controlling thread, never from discovery workers.
pub trait AggregationEventHandler: Send + Sync {
    fn on_aggregation_started(&self, _event: &AggregationStartedEvent) {}
    fn on_pass_started(&self, _event: &PassStartedEvent) {}
    fn on_node_discovered(&self, _event: &NodeDiscoveredEvent) {}
    fn on_node_missing(&self, _event: &NodeMissingEvent) {}
    fn on_relationships_rejected(&self, _event: &RelationshipsRejectedEvent) {}
    fn on_pass_complete(&self, _event: &PassCompleteEvent) {}
    fn on_aggregation_complete(&self, _event: &AggregationCompleteEvent) {}
}
