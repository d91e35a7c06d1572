//! Per-run aggregation options.

use serde::{Deserialize, Serialize};

use super::DiscoveryConfig;
use crate::constants;

/// Options for one aggregation run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AggregationOptions {
    /// Run discovery at all. Default: true.
    pub discovery_enabled: Option<bool>,
    /// Source recorded on synthesized relationships.
    pub discovery_source: Option<String>,
    /// Passed through untouched to the discoverer.
    pub discovery: DiscoveryConfig,
}

impl AggregationOptions {
    pub fn enabled() -> Self {
        Self {
            discovery_enabled: Some(true),
            ..Default::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            discovery_enabled: Some(false),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.discovery_source = Some(source.into());
        self
    }

    pub fn with_patcher(mut self, id: impl Into<String>) -> Self {
        self.discovery.enabled_patchers.push(id.into());
        self
    }

    pub fn discovery_enabled(&self) -> bool {
        self.discovery_enabled
            .unwrap_or(constants::DEFAULT_DISCOVERY_ENABLED)
    }

    pub fn discovery_source(&self) -> &str {
        self.discovery_source
            .as_deref()
            .unwrap_or(constants::DEFAULT_DISCOVERY_SOURCE)
    }

    pub fn discovery_config(&self) -> &DiscoveryConfig {
        &self.discovery
    }
}
