//! Initial run state drawn from the graph: known cycle participants and
//! the first batch of todos.

use std::collections::BTreeSet;
use std::sync::Arc;

use depgraph_core::errors::GraphResult;
use depgraph_core::filter::FilterRef;
use depgraph_core::models::GraphPath;
use depgraph_core::traits::GraphStore;
use depgraph_core::types::NodeRef;
use tracing::debug;

use crate::todo::TodoSet;

/// Union of the participants of every cycle the graph has recorded.
pub fn load_cycle_participants<G>(graph: &G) -> GraphResult<BTreeSet<NodeRef>>
where
    G: GraphStore + ?Sized,
{
    Ok(graph
        .cycles()?
        .into_iter()
        .flat_map(|cycle| cycle.participants)
        .collect())
}

/// Todos for every incomplete node reachable under the top filter.
///
/// Incomplete roots start with the top filter itself. Every other incomplete
/// node gets the filter at the end of each root path the top filter accepts
/// at every step; rejected paths contribute nothing.
pub fn load_initial_pending<G>(graph: &G) -> GraphResult<TodoSet>
where
    G: GraphStore + ?Sized,
{
    let roots = graph.roots()?;
    let incomplete = graph.incomplete_subgraphs()?;
    let top = graph.top_filter();
    let mut pending = TodoSet::new();

    if incomplete.is_empty() {
        return Ok(pending);
    }

    for root in roots.intersection(&incomplete) {
        pending.add_filter(root.clone(), Arc::clone(&top));
    }

    let targets: Vec<NodeRef> = incomplete.into_iter().collect();
    for path in graph.paths_to(&targets)? {
        let Some(target) = path.target().cloned() else {
            continue;
        };
        match walk_path(&top, &path) {
            Some(filter) => pending.add_filter(target, filter),
            None => debug!(node = %target, hops = path.len(), "path rejected by top filter"),
        }
    }

    Ok(pending)
}

/// Walk `top` along `path`. `None` if any step is rejected. Selection steps
/// pass through unchanged.
pub fn walk_path(top: &FilterRef, path: &GraphPath) -> Option<FilterRef> {
    let mut filter = Arc::clone(top);
    for rel in path.iter().filter(|rel| !rel.is_selection()) {
        if !filter.accept(rel) {
            return None;
        }
        filter = filter.child_filter(rel);
    }
    Some(filter)
}
