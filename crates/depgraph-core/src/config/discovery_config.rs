//! Opaque discovery settings handed to discoverers and patchers.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Per-node discovery timeout in seconds. Default: 60.
    pub timeout_secs: Option<u64>,
    /// Ask discoverers to store relationships themselves. Default: false.
    pub store_directly: Option<bool>,
    /// Ids of result patchers to run after each discovery.
    #[serde(default)]
    pub enabled_patchers: Vec<String>,
    /// Discoverer-specific settings.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl DiscoveryConfig {
    pub fn effective_timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .unwrap_or(constants::DEFAULT_DISCOVERY_TIMEOUT_SECS),
        )
    }

    pub fn store_directly(&self) -> bool {
        self.store_directly.unwrap_or(false)
    }

    pub fn patcher_enabled(&self, id: &str) -> bool {
        self.enabled_patchers.iter().any(|p| p == id)
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}
