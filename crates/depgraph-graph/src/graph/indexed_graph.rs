//! petgraph::StableGraph wrapper keyed by `NodeRef`.

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::visit::EdgeRef;
use petgraph::Directed;

use depgraph_core::types::{FxHashMap, NodeRef, Relationship};

/// The underlying directed graph type.
pub type DepStableGraph = StableGraph<NodeRef, Relationship, Directed>;

/// Wrapper providing indexed access to the relationship graph.
pub struct IndexedGraph {
    /// The petgraph stable graph.
    pub graph: DepStableGraph,
    /// Map from node ref to NodeIndex for O(1) lookup.
    pub node_index: FxHashMap<NodeRef, NodeIndex>,
}

impl IndexedGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: FxHashMap::default(),
        }
    }

    /// Get or create the node for `node`.
    pub fn ensure_node(&mut self, node: &NodeRef) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(node) {
            return idx;
        }
        let idx = self.graph.add_node(node.clone());
        self.node_index.insert(node.clone(), idx);
        idx
    }

    pub fn get_node(&self, node: &NodeRef) -> Option<NodeIndex> {
        self.node_index.get(node).copied()
    }

    /// Whether an equivalent edge (same endpoints, type, and managed flag)
    /// is already stored.
    pub fn has_equivalent_edge(&self, source: NodeIndex, target: NodeIndex, rel: &Relationship) -> bool {
        self.graph.edges(source).any(|e| {
            let w = e.weight();
            e.target() == target && w.rel_type == rel.rel_type && w.managed == rel.managed
        })
    }

    /// Outgoing edges of `idx` in relationship order, so traversals are
    /// deterministic regardless of insertion order.
    pub fn outgoing(&self, idx: NodeIndex) -> Vec<(NodeIndex, &Relationship)> {
        let mut edges: Vec<(NodeIndex, &Relationship)> = self
            .graph
            .edges(idx)
            .map(|e| (e.target(), e.weight()))
            .collect();
        edges.sort_by(|a, b| a.1.cmp(b.1));
        edges
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for IndexedGraph {
    fn default() -> Self {
        Self::new()
    }
}
