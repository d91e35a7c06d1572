//! Data carried between the graph store, discoverers, and the aggregator.

pub mod cycle;
pub mod discovery_result;
pub mod path;

pub use cycle::CycleRecord;
pub use discovery_result::DiscoveryResult;
pub use path::GraphPath;
