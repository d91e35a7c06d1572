//! Cycle detection before every edge insertion.
//! Rejects any edge that would create a cycle in the DAG.

use std::collections::VecDeque;

use petgraph::algo::tarjan_scc;
use petgraph::stable_graph::NodeIndex;
use petgraph::visit::{Dfs, EdgeRef};

use depgraph_core::types::{FxHashMap, Relationship};

use super::indexed_graph::{DepStableGraph, IndexedGraph};

/// Check whether adding an edge from `source` to `target` would create a cycle.
///
/// Returns `true` if a cycle would be created (edge should be rejected).
pub fn would_create_cycle(graph: &IndexedGraph, source: NodeIndex, target: NodeIndex) -> bool {
    // Self-loops are always cycles.
    if source == target {
        return true;
    }

    // If target can already reach source, adding source→target closes a cycle.
    has_path(&graph.graph, target, source)
}

/// DFS-based reachability check: can we reach `to` from `from`?
fn has_path(graph: &DepStableGraph, from: NodeIndex, to: NodeIndex) -> bool {
    let mut dfs = Dfs::new(graph, from);
    while let Some(node) = dfs.next(graph) {
        if node == to {
            return true;
        }
    }
    false
}

/// Shortest stored relationship chain from `from` to `to` (BFS).
/// Empty when `from == to`; `None` when `to` is unreachable.
pub fn path_between(graph: &IndexedGraph, from: NodeIndex, to: NodeIndex) -> Option<Vec<Relationship>> {
    let mut came_from: FxHashMap<NodeIndex, (NodeIndex, Relationship)> = FxHashMap::default();
    let mut queue = VecDeque::from([from]);

    while let Some(current) = queue.pop_front() {
        if current == to {
            let mut chain = Vec::new();
            let mut cursor = to;
            while let Some((prev, rel)) = came_from.get(&cursor) {
                chain.push(rel.clone());
                cursor = *prev;
            }
            chain.reverse();
            return Some(chain);
        }
        for edge in graph.graph.edges(current) {
            let next = edge.target();
            if next != from && !came_from.contains_key(&next) {
                came_from.insert(next, (current, edge.weight().clone()));
                queue.push_back(next);
            }
        }
    }
    None
}

/// Validate the entire graph is a DAG.
/// Returns the strongly connected components with more than one node.
pub fn find_cycles(graph: &IndexedGraph) -> Vec<Vec<NodeIndex>> {
    tarjan_scc(&graph.graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use depgraph_core::types::NodeRef;

    fn n(name: &str) -> NodeRef {
        NodeRef::new("g", name, "1")
    }

    fn chain() -> (IndexedGraph, NodeIndex, NodeIndex, NodeIndex) {
        let mut g = IndexedGraph::new();
        let a = g.ensure_node(&n("a"));
        let b = g.ensure_node(&n("b"));
        let c = g.ensure_node(&n("c"));
        g.graph.add_edge(a, b, Relationship::dependency(n("a"), n("b")));
        g.graph.add_edge(b, c, Relationship::dependency(n("b"), n("c")));
        (g, a, b, c)
    }

    #[test]
    fn back_edge_would_close_cycle() {
        let (g, a, _, c) = chain();
        assert!(would_create_cycle(&g, c, a));
        assert!(!would_create_cycle(&g, a, c));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let (g, a, _, _) = chain();
        assert!(would_create_cycle(&g, a, a));
    }

    #[test]
    fn path_between_follows_edges() {
        let (g, a, _, c) = chain();
        let path = path_between(&g, a, c).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].declaring, n("a"));
        assert_eq!(path[1].target, n("c"));
        assert!(path_between(&g, c, a).is_none());
    }

    #[test]
    fn chain_has_no_cycles() {
        let (g, _, _, _) = chain();
        assert!(find_cycles(&g).is_empty());
    }
}
