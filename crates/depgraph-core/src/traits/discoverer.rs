//! Turns a node reference into its declared relationships.

use crate::config::DiscoveryConfig;
use crate::errors::DiscoveryError;
use crate::models::DiscoveryResult;
use crate::types::NodeRef;

/// Relationship discovery for one node.
///
/// Called concurrently from worker threads; may block on I/O.
pub trait Discoverer: Send + Sync {
    /// `Ok(None)` means the node could not be found.
    fn discover_relationships(
        &self,
        node: &NodeRef,
        config: &DiscoveryConfig,
        store_directly: bool,
    ) -> Result<Option<DiscoveryResult>, DiscoveryError>;
}
