//! The shared graph the aggregator reads from and writes to.

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::GraphResult;
use crate::filter::FilterRef;
use crate::models::{CycleRecord, GraphPath};
use crate::types::{NodeRef, Relationship};

/// Graph storage operations.
///
/// Implementations synchronize internally: readers may run concurrently with
/// each other, and `store_relationships` must be atomic with respect to them.
pub trait GraphStore: Send + Sync {
    // --- Queries ---

    /// True once `node` has declared its own relationships.
    fn contains_graph(&self, node: &NodeRef) -> GraphResult<bool>;

    /// Nodes reachable from the roots whose relationships are still unknown.
    fn incomplete_subgraphs(&self) -> GraphResult<BTreeSet<NodeRef>>;

    fn roots(&self) -> GraphResult<BTreeSet<NodeRef>>;

    /// Every relationship path from a root to one of `targets`.
    fn paths_to(&self, targets: &[NodeRef]) -> GraphResult<Vec<GraphPath>>;

    /// Cycles recorded so far.
    fn cycles(&self) -> GraphResult<Vec<CycleRecord>>;

    /// Root acceptance policy for a whole run.
    fn top_filter(&self) -> FilterRef;

    // --- Mutation ---

    /// Store `rels` as one atomic operation. Returns the subset rejected
    /// (e.g. because storing it would close a cycle).
    fn store_relationships(&self, rels: &[Relationship]) -> GraphResult<Vec<Relationship>>;

    fn add_metadata(&self, node: &NodeRef, metadata: &BTreeMap<String, String>) -> GraphResult<()>;
}
