//! # depgraph-graph
//!
//! In-memory `GraphStore` implementation. Relationships live in a
//! `petgraph::StableGraph`; any edge that would close a cycle is rejected
//! and recorded instead of stored.

pub mod graph;
pub mod memory_graph;

pub use memory_graph::MemoryGraph;
