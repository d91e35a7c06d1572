//! Top-level depgraph configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AggregationOptions, PoolConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`DEPGRAPH_*`)
/// 2. Project config (`depgraph.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DepgraphConfig {
    pub aggregation: AggregationOptions,
    pub pool: PoolConfig,
}

impl DepgraphConfig {
    /// Load configuration with layered resolution. A missing project file
    /// falls back to defaults; a malformed one is an error.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(constants::CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &DepgraphConfig) -> Result<(), ConfigError> {
        config.pool.validate()?;
        if let Some(ref source) = config.aggregation.discovery_source {
            if source.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "aggregation.discovery_source".to_string(),
                    message: "must not be blank".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut DepgraphConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: DepgraphConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut DepgraphConfig, other: &DepgraphConfig) {
        // Aggregation
        if other.aggregation.discovery_enabled.is_some() {
            base.aggregation.discovery_enabled = other.aggregation.discovery_enabled;
        }
        if other.aggregation.discovery_source.is_some() {
            base.aggregation.discovery_source = other.aggregation.discovery_source.clone();
        }

        // Discovery
        let (b, o) = (&mut base.aggregation.discovery, &other.aggregation.discovery);
        if o.timeout_secs.is_some() {
            b.timeout_secs = o.timeout_secs;
        }
        if o.store_directly.is_some() {
            b.store_directly = o.store_directly;
        }
        if !o.enabled_patchers.is_empty() {
            b.enabled_patchers = o.enabled_patchers.clone();
        }
        for (k, v) in &o.properties {
            b.properties.insert(k.clone(), v.clone());
        }

        // Pool
        if other.pool.worker_threads.is_some() {
            base.pool.worker_threads = other.pool.worker_threads;
        }
        if other.pool.cancel_poll_ms.is_some() {
            base.pool.cancel_poll_ms = other.pool.cancel_poll_ms;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `DEPGRAPH_WORKER_THREADS`, `DEPGRAPH_DISCOVERY_ENABLED`, etc.
    fn apply_env_overrides(config: &mut DepgraphConfig) {
        if let Ok(val) = std::env::var("DEPGRAPH_DISCOVERY_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.aggregation.discovery_enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("DEPGRAPH_DISCOVERY_SOURCE") {
            config.aggregation.discovery_source = Some(val);
        }
        if let Ok(val) = std::env::var("DEPGRAPH_DISCOVERY_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.aggregation.discovery.timeout_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("DEPGRAPH_WORKER_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.pool.worker_threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("DEPGRAPH_CANCEL_POLL_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.pool.cancel_poll_ms = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
