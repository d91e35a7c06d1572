//! Reachability and path enumeration over the stored graph.

use std::collections::VecDeque;

use petgraph::stable_graph::NodeIndex;

use depgraph_core::types::{FxHashSet, Relationship};

use super::indexed_graph::IndexedGraph;

/// Every node reachable from `starts`, the starts included.
pub fn reachable_from(graph: &IndexedGraph, starts: impl IntoIterator<Item = NodeIndex>) -> Vec<NodeIndex> {
    let mut seen = FxHashSet::default();
    let mut order = Vec::new();
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    for start in starts {
        if seen.insert(start) {
            queue.push_back(start);
        }
    }
    while let Some(current) = queue.pop_front() {
        order.push(current);
        for (next, _) in graph.outgoing(current) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    order
}

/// All simple relationship paths from `root` ending at any of `targets`.
/// A path is reported every time it reaches a target, and the walk
/// continues past it toward targets further down.
pub fn simple_paths_to(
    graph: &IndexedGraph,
    root: NodeIndex,
    targets: &FxHashSet<NodeIndex>,
) -> Vec<Vec<Relationship>> {
    let mut walker = PathWalker {
        graph,
        targets,
        on_path: FxHashSet::default(),
        stack: Vec::new(),
        found: Vec::new(),
    };
    walker.visit(root);
    walker.found
}

struct PathWalker<'a> {
    graph: &'a IndexedGraph,
    targets: &'a FxHashSet<NodeIndex>,
    on_path: FxHashSet<NodeIndex>,
    stack: Vec<Relationship>,
    found: Vec<Vec<Relationship>>,
}

impl PathWalker<'_> {
    fn visit(&mut self, node: NodeIndex) {
        if !self.stack.is_empty() && self.targets.contains(&node) {
            self.found.push(self.stack.clone());
        }
        self.on_path.insert(node);
        for (next, rel) in self.graph.outgoing(node) {
            if self.on_path.contains(&next) {
                continue;
            }
            self.stack.push(rel.clone());
            self.visit(next);
            self.stack.pop();
        }
        self.on_path.remove(&node);
    }
}
