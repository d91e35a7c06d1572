//! Graph primitives backing `MemoryGraph`.

pub mod dag_enforcement;
pub mod indexed_graph;
pub mod traversal;

pub use indexed_graph::{DepStableGraph, IndexedGraph};
