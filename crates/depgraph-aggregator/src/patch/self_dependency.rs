//! Drops relationships a node declares on itself.

use depgraph_core::config::DiscoveryConfig;
use depgraph_core::models::DiscoveryResult;
use depgraph_core::traits::ResultPatcher;
use depgraph_core::types::RelationshipType;

/// Removes non-PARENT relationships whose target is their declaring node.
/// Such edges can only ever be rejected as cycles.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelfDependencyPatcher;

impl SelfDependencyPatcher {
    pub const ID: &'static str = "self-dependency";
}

impl ResultPatcher for SelfDependencyPatcher {
    fn id(&self) -> &str {
        Self::ID
    }

    fn patch(&self, result: &mut DiscoveryResult, _config: &DiscoveryConfig) {
        if let Some(accepted) = result.accepted.as_mut() {
            let before = accepted.len();
            accepted.retain(|r| r.rel_type == RelationshipType::Parent || r.declaring != r.target);
            let dropped = before - accepted.len();
            if dropped > 0 {
                tracing::debug!(dropped, "dropped self-referential relationships");
            }
        }
    }
}
