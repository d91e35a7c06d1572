//! Collaborator contracts consumed by the aggregation engine.

pub mod cancellation;
pub mod discoverer;
pub mod graph_store;
pub mod patcher;

pub use cancellation::{Cancellable, CancellationToken};
pub use discoverer::Discoverer;
pub use graph_store::GraphStore;
pub use patcher::ResultPatcher;
