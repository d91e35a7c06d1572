//! # depgraph-core
//!
//! Foundation crate for the depgraph aggregation engine.
//! Defines node and relationship types, relationship filters, the collaborator
//! traits (`GraphStore`, `Discoverer`, `ResultPatcher`), errors, config,
//! events, tracing setup, and constants. Every other crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod filter;
pub mod models;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::{AggregationOptions, DepgraphConfig, DiscoveryConfig, PoolConfig};
pub use errors::{AggregationError, ConfigError, DiscoveryError, GraphStoreError};
pub use filter::{FilterRef, FilterSet, RelationshipFilter};
pub use models::{CycleRecord, DiscoveryResult, GraphPath};
pub use traits::{CancellationToken, Cancellable, Discoverer, GraphStore, ResultPatcher};
pub use types::{NodeRef, Relationship, RelationshipType};
