//! Post-discovery result patchers.

use crate::config::DiscoveryConfig;
use crate::models::DiscoveryResult;

/// Adjusts a discovery result before it is folded into the graph.
///
/// Enabled per run by id through `DiscoveryConfig::enabled_patchers`.
pub trait ResultPatcher: Send + Sync {
    fn id(&self) -> &str;

    fn patch(&self, result: &mut DiscoveryResult, config: &DiscoveryConfig);
}
