//! MemoryGraph: thread-safe in-memory `GraphStore`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use depgraph_core::errors::{GraphResult, GraphStoreError};
use depgraph_core::filter::FilterRef;
use depgraph_core::models::{CycleRecord, GraphPath};
use depgraph_core::traits::GraphStore;
use depgraph_core::types::{FxHashSet, NodeRef, Relationship};
use petgraph::stable_graph::NodeIndex;

use crate::graph::{dag_enforcement, traversal, IndexedGraph};

#[derive(Default)]
struct GraphState {
    indexed: IndexedGraph,
    roots: BTreeSet<NodeRef>,
    /// Nodes with at least one stored relationship (or terminal marker).
    /// A node whose only relationships were rejected stays unresolved.
    resolved: FxHashSet<NodeRef>,
    cycles: Vec<CycleRecord>,
    metadata: BTreeMap<NodeRef, BTreeMap<String, String>>,
    /// Every relationship accepted, in storage order.
    stored: Vec<Relationship>,
}

impl GraphState {
    fn subgraph_resolved(&self, idx: NodeIndex) -> bool {
        traversal::reachable_from(&self.indexed, [idx])
            .into_iter()
            .all(|i| self.resolved.contains(&self.indexed.graph[i]))
    }
}

/// In-memory relationship graph guarded by a single `RwLock`.
///
/// Readers run concurrently; `store_relationships` holds the write lock for
/// the whole batch, so cycle checks and insertions are atomic with respect
/// to every reader.
pub struct MemoryGraph {
    state: RwLock<GraphState>,
    top_filter: FilterRef,
}

impl MemoryGraph {
    pub fn new(roots: impl IntoIterator<Item = NodeRef>, top_filter: FilterRef) -> Self {
        let mut state = GraphState::default();
        for root in roots {
            state.indexed.ensure_node(&root);
            state.roots.insert(root);
        }
        Self {
            state: RwLock::new(state),
            top_filter,
        }
    }

    pub fn add_root(&self, root: NodeRef) -> GraphResult<()> {
        let mut state = self.write()?;
        state.indexed.ensure_node(&root);
        state.roots.insert(root);
        Ok(())
    }

    /// Every stored relationship, in storage order.
    pub fn relationships(&self) -> GraphResult<Vec<Relationship>> {
        Ok(self.read()?.stored.clone())
    }

    pub fn metadata(&self, node: &NodeRef) -> GraphResult<Option<BTreeMap<String, String>>> {
        Ok(self.read()?.metadata.get(node).cloned())
    }

    /// Whether `node` itself has declared its relationships.
    pub fn is_resolved(&self, node: &NodeRef) -> GraphResult<bool> {
        Ok(self.read()?.resolved.contains(node))
    }

    pub fn node_count(&self) -> GraphResult<usize> {
        Ok(self.read()?.indexed.node_count())
    }

    pub fn edge_count(&self) -> GraphResult<usize> {
        Ok(self.read()?.indexed.edge_count())
    }

    /// Strongly connected components of the stored edges. Always empty
    /// while DAG enforcement holds.
    pub fn find_cycles(&self) -> GraphResult<Vec<Vec<NodeRef>>> {
        let state = self.read()?;
        Ok(dag_enforcement::find_cycles(&state.indexed)
            .into_iter()
            .map(|scc| scc.into_iter().map(|i| state.indexed.graph[i].clone()).collect())
            .collect())
    }

    fn read(&self) -> GraphResult<RwLockReadGuard<'_, GraphState>> {
        self.state
            .read()
            .map_err(|e| GraphStoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> GraphResult<RwLockWriteGuard<'_, GraphState>> {
        self.state
            .write()
            .map_err(|e| GraphStoreError::LockPoisoned(e.to_string()))
    }
}

impl GraphStore for MemoryGraph {
    fn contains_graph(&self, node: &NodeRef) -> GraphResult<bool> {
        let state = self.read()?;
        Ok(match state.indexed.get_node(node) {
            Some(idx) => state.subgraph_resolved(idx),
            None => false,
        })
    }

    fn incomplete_subgraphs(&self) -> GraphResult<BTreeSet<NodeRef>> {
        let state = self.read()?;
        let roots = state.roots.iter().filter_map(|r| state.indexed.get_node(r));
        Ok(traversal::reachable_from(&state.indexed, roots)
            .into_iter()
            .map(|i| &state.indexed.graph[i])
            .filter(|n| !state.resolved.contains(*n))
            .cloned()
            .collect())
    }

    fn roots(&self) -> GraphResult<BTreeSet<NodeRef>> {
        Ok(self.read()?.roots.clone())
    }

    fn paths_to(&self, targets: &[NodeRef]) -> GraphResult<Vec<GraphPath>> {
        let state = self.read()?;
        let target_idx: FxHashSet<NodeIndex> = targets
            .iter()
            .filter_map(|t| state.indexed.get_node(t))
            .collect();
        if target_idx.is_empty() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for root in &state.roots {
            let Some(root_idx) = state.indexed.get_node(root) else {
                continue;
            };
            paths.extend(
                traversal::simple_paths_to(&state.indexed, root_idx, &target_idx)
                    .into_iter()
                    .map(GraphPath::new),
            );
        }
        Ok(paths)
    }

    fn cycles(&self) -> GraphResult<Vec<CycleRecord>> {
        Ok(self.read()?.cycles.clone())
    }

    fn top_filter(&self) -> FilterRef {
        Arc::clone(&self.top_filter)
    }

    fn store_relationships(&self, rels: &[Relationship]) -> GraphResult<Vec<Relationship>> {
        let mut batch = rels.to_vec();
        batch.sort();
        batch.dedup();

        let mut state = self.write()?;
        let mut rejected = Vec::new();

        for rel in batch {
            let source = state.indexed.ensure_node(&rel.declaring);

            if rel.is_terminal() {
                tracing::trace!(node = %rel.declaring, "terminal marker recorded");
                state.resolved.insert(rel.declaring);
                continue;
            }

            let target = state.indexed.ensure_node(&rel.target);
            if state.indexed.has_equivalent_edge(source, target, &rel) {
                state.resolved.insert(rel.declaring);
                continue;
            }

            if dag_enforcement::would_create_cycle(&state.indexed, source, target) {
                let mut chain =
                    dag_enforcement::path_between(&state.indexed, target, source).unwrap_or_default();
                chain.push(rel.clone());
                tracing::debug!(
                    relationship = %rel,
                    cycle_len = chain.len(),
                    "rejecting relationship that would close a cycle"
                );
                state.cycles.push(CycleRecord::from_relationships(chain));
                rejected.push(rel);
                continue;
            }

            state.indexed.graph.add_edge(source, target, rel.clone());
            state.resolved.insert(rel.declaring.clone());
            state.stored.push(rel);
        }

        Ok(rejected)
    }

    fn add_metadata(&self, node: &NodeRef, metadata: &BTreeMap<String, String>) -> GraphResult<()> {
        let mut state = self.write()?;
        state
            .metadata
            .entry(node.clone())
            .or_default()
            .extend(metadata.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }
}
