//! Pending discovery work keyed by node.

use std::collections::BTreeMap;
use std::fmt;

use depgraph_core::filter::{FilterRef, FilterSet};
use depgraph_core::types::{FxHashSet, NodeRef};

/// One node awaiting discovery, with every filter chain it was reached by.
#[derive(Debug, Clone)]
pub struct DiscoveryTodo {
    pub node: NodeRef,
    pub filters: FilterSet,
}

impl DiscoveryTodo {
    pub fn new(node: NodeRef, filters: FilterSet) -> Self {
        Self { node, filters }
    }
}

impl fmt::Display for DiscoveryTodo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} filters)", self.node, self.filters.len())
    }
}

/// Todos under construction. Filters reaching the same node merge by id.
#[derive(Debug, Clone, Default)]
pub struct TodoSet {
    todos: BTreeMap<NodeRef, FilterSet>,
}

impl TodoSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `filters` into the todo for `node`.
    pub fn merge(&mut self, node: NodeRef, filters: FilterSet) {
        self.todos.entry(node).or_default().extend(filters);
    }

    /// Add one filter chain to the todo for `node`, creating it if needed.
    pub fn add_filter(&mut self, node: NodeRef, filter: FilterRef) {
        self.todos.entry(node).or_default().insert(filter);
    }

    /// Drop every todo whose node was already attempted this run.
    pub fn remove_done(&mut self, done: &FxHashSet<NodeRef>) {
        self.todos.retain(|node, _| !done.contains(node));
    }

    /// Filters accumulated so far for `node`.
    pub fn filters_for(&self, node: &NodeRef) -> Option<&FilterSet> {
        self.todos.get(node)
    }

    pub fn contains(&self, node: &NodeRef) -> bool {
        self.todos.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Pending nodes in order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRef> {
        self.todos.keys()
    }

    /// Todos in node order.
    pub fn into_todos(self) -> Vec<DiscoveryTodo> {
        self.todos
            .into_iter()
            .map(|(node, filters)| DiscoveryTodo::new(node, filters))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use depgraph_core::filter::{AnyFilter, DepthFilter, NoneFilter};

    use super::*;

    fn n(name: &str) -> NodeRef {
        NodeRef::new("g", name, "1")
    }

    #[test]
    fn merging_dedups_filters_by_id() {
        let mut set = TodoSet::new();
        set.add_filter(n("a"), Arc::new(AnyFilter));
        set.merge(
            n("a"),
            [Arc::new(AnyFilter) as FilterRef, Arc::new(DepthFilter::new(2)) as FilterRef]
                .into_iter()
                .collect(),
        );
        assert_eq!(set.len(), 1);
        assert_eq!(set.filters_for(&n("a")).map(FilterSet::len), Some(2));
    }

    #[test]
    fn remove_done_drops_attempted_nodes_regardless_of_filters() {
        let mut set = TodoSet::new();
        set.add_filter(n("a"), Arc::new(NoneFilter));
        set.add_filter(n("b"), Arc::new(AnyFilter));
        let done: FxHashSet<NodeRef> = [n("a")].into_iter().collect();
        set.remove_done(&done);
        assert!(!set.contains(&n("a")));
        assert_eq!(set.into_todos().len(), 1);
    }
}
