//! PatcherRegistry: the patchers available to a run, applied by id.

use std::sync::Arc;

use depgraph_core::config::DiscoveryConfig;
use depgraph_core::models::DiscoveryResult;
use depgraph_core::traits::ResultPatcher;

use super::SelfDependencyPatcher;

/// Known patchers. Only those named in `DiscoveryConfig::enabled_patchers`
/// run, in registration order.
#[derive(Clone, Default)]
pub struct PatcherRegistry {
    patchers: Vec<Arc<dyn ResultPatcher>>,
}

impl PatcherRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in patchers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SelfDependencyPatcher));
        registry
    }

    /// Register a patcher. A patcher with the same id replaces the old one.
    pub fn register(&mut self, patcher: Arc<dyn ResultPatcher>) {
        self.patchers.retain(|p| p.id() != patcher.id());
        self.patchers.push(patcher);
    }

    /// Registered patcher ids, in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.patchers.iter().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.patchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patchers.is_empty()
    }

    /// Run every enabled patcher over `result`.
    pub fn apply(&self, result: &mut DiscoveryResult, config: &DiscoveryConfig) {
        for patcher in &self.patchers {
            if config.patcher_enabled(patcher.id()) {
                tracing::trace!(patcher = patcher.id(), "applying result patcher");
                patcher.patch(result, config);
            }
        }
    }
}

impl std::fmt::Debug for PatcherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}
