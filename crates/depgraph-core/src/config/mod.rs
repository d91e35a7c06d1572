//! Configuration system for depgraph.
//! TOML-based, 3-layer resolution: env > project file > defaults.

pub mod aggregation_options;
pub mod depgraph_config;
pub mod discovery_config;
pub mod pool_config;

pub use aggregation_options::AggregationOptions;
pub use depgraph_config::DepgraphConfig;
pub use discovery_config::DiscoveryConfig;
pub use pool_config::PoolConfig;
