//! Error handling for depgraph.
//! One error enum per concern, `thiserror` only.

pub mod aggregation_error;
pub mod config_error;
pub mod discovery_error;
pub mod error_code;
pub mod graph_error;

pub use aggregation_error::AggregationError;
pub use config_error::ConfigError;
pub use discovery_error::DiscoveryError;
pub use error_code::DepgraphErrorCode;
pub use graph_error::{GraphResult, GraphStoreError};
