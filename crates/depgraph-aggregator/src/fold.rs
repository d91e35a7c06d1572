//! Folds a completed batch into relationships to store and the next todos.

use std::collections::BTreeSet;

use depgraph_core::errors::GraphResult;
use depgraph_core::filter::FilterSet;
use depgraph_core::traits::GraphStore;
use depgraph_core::types::{NodeRef, Relationship, RelationshipType};
use tracing::{debug, info};

use crate::state::RunState;
use crate::todo::TodoSet;
use crate::work_item::{TaskOutcome, WorkItem};

/// Everything one pass's results contribute.
#[derive(Debug, Default)]
pub struct FoldOutcome {
    /// Relationships to store in one batch.
    pub relationships: BTreeSet<Relationship>,
    /// Newly reached targets with the filters that reached them.
    pub targets: TodoSet,
    /// Selected refs that returned a result, with their relationship count.
    pub discovered: Vec<(NodeRef, usize)>,
    /// Refs newly marked missing, with the reason.
    pub missing: Vec<(NodeRef, String)>,
}

/// Fold `items` single-threaded after the barrier.
///
/// Per relationship whose target's subgraph is not yet in the graph: keep it
/// when any todo filter accepts it (recording the accepting child filters for
/// the target), force-keep it when it is a PARENT edge, otherwise drop it.
/// A node whose relationships all fell through gets a terminal marker. A todo
/// resolved to a different ref gets a selection edge to it.
pub fn fold_results<G>(
    pass: usize,
    items: &[WorkItem],
    graph: &G,
    state: &mut RunState,
    discovery_source: &str,
) -> GraphResult<FoldOutcome>
where
    G: GraphStore + ?Sized,
{
    info!(pass, missing = state.missing.len(), "accounting for discovery results");
    let mut out = FoldOutcome::default();

    for item in items {
        let todo = &item.todo;
        let result = match &item.outcome {
            TaskOutcome::Discovered(result) => result,
            outcome => {
                let node = outcome.selected().unwrap_or(&todo.node);
                for node in state.mark_missing(node, &todo.node) {
                    out.missing.push((node, outcome.reason().to_string()));
                }
                continue;
            }
        };

        let selected = result.selected_or(&todo.node).clone();
        if selected != todo.node {
            info!(requested = %todo.node, node = %selected, "SELECT: requested ref resolved");
            out.relationships.insert(Relationship::selection(
                discovery_source,
                todo.node.clone(),
                selected.clone(),
            ));
        }
        if let Some(metadata) = result.metadata.as_ref() {
            graph.add_metadata(&selected, metadata)?;
        }

        let Some(rels) = result.accepted.as_ref() else {
            info!(pass, index = item.index, node = %selected, "discovered relationships empty");
            out.discovered.push((selected, 0));
            continue;
        };
        info!(
            pass,
            index = item.index,
            node = %selected,
            relationships = rels.len(),
            "processing new relationships"
        );

        let contributed = fold_relationships(pass, item.index, rels, &todo.filters, graph, &mut out)?;
        if !contributed && !rels.is_empty() {
            info!(node = %selected, "INJECT: terminal parent marks node resolved");
            out.relationships
                .insert(Relationship::terminal_parent(discovery_source, selected.clone()));
        }
        out.discovered.push((selected, rels.len()));
    }

    Ok(out)
}

/// Returns whether any relationship was kept.
fn fold_relationships<G>(
    pass: usize,
    index: usize,
    rels: &[Relationship],
    filters: &FilterSet,
    graph: &G,
    out: &mut FoldOutcome,
) -> GraphResult<bool>
where
    G: GraphStore + ?Sized,
{
    let mut contributed = false;
    for (idx, rel) in rels.iter().enumerate() {
        if graph.contains_graph(&rel.target)? {
            debug!(pass, index, idx, target = %rel.target, "SKIP (already discovered)");
            continue;
        }

        let accepting = filters.accepting_children(rel);
        if !accepting.is_empty() {
            debug!(pass, index, idx, target = %rel.target, filters = accepting.len(), "DISCOVER += target");
            out.relationships.insert(rel.clone());
            out.targets.merge(rel.target.clone(), accepting);
            contributed = true;
        } else if rel.rel_type == RelationshipType::Parent {
            info!(relationship = %rel, "FORCE: adding parent relationship");
            out.relationships.insert(rel.clone());
            contributed = true;
        } else {
            debug!(pass, index, idx, target = %rel.target, "SKIP (filtered)");
        }
    }
    Ok(contributed)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use depgraph_core::errors::GraphResult;
    use depgraph_core::filter::{AnyFilter, ExcludingFilter, FilterRef, NoneFilter, TypeFilter};
    use depgraph_core::models::{CycleRecord, DiscoveryResult, GraphPath};

    use super::*;
    use crate::todo::DiscoveryTodo;

    /// Store that knows nothing, except that `complete` nodes are present.
    #[derive(Default)]
    struct StubStore {
        complete: BTreeSet<NodeRef>,
    }

    impl GraphStore for StubStore {
        fn contains_graph(&self, node: &NodeRef) -> GraphResult<bool> {
            Ok(self.complete.contains(node))
        }
        fn incomplete_subgraphs(&self) -> GraphResult<BTreeSet<NodeRef>> {
            Ok(BTreeSet::new())
        }
        fn roots(&self) -> GraphResult<BTreeSet<NodeRef>> {
            Ok(BTreeSet::new())
        }
        fn paths_to(&self, _targets: &[NodeRef]) -> GraphResult<Vec<GraphPath>> {
            Ok(Vec::new())
        }
        fn cycles(&self) -> GraphResult<Vec<CycleRecord>> {
            Ok(Vec::new())
        }
        fn top_filter(&self) -> FilterRef {
            Arc::new(AnyFilter)
        }
        fn store_relationships(&self, _rels: &[Relationship]) -> GraphResult<Vec<Relationship>> {
            Ok(Vec::new())
        }
        fn add_metadata(&self, _node: &NodeRef, _metadata: &BTreeMap<String, String>) -> GraphResult<()> {
            Ok(())
        }
    }

    fn n(name: &str) -> NodeRef {
        NodeRef::new("g", name, "1")
    }

    fn item(node: NodeRef, filters: Vec<FilterRef>, outcome: TaskOutcome) -> WorkItem {
        WorkItem {
            index: 0,
            todo: DiscoveryTodo::new(node, filters.into_iter().collect()),
            outcome,
        }
    }

    fn fold(items: &[WorkItem], store: &StubStore) -> (FoldOutcome, RunState) {
        let mut state = RunState::default();
        let out = fold_results(0, items, store, &mut state, "test").unwrap();
        (out, state)
    }

    #[test]
    fn union_of_filters_accepts_what_any_member_accepts() {
        let t = n("t");
        let x = Relationship::dependency(t.clone(), n("x"));
        let items = [item(
            t.clone(),
            vec![
                Arc::new(ExcludingFilter::new([n("x")], Arc::new(AnyFilter))),
                Arc::new(TypeFilter::concrete([RelationshipType::Dependency])),
            ],
            TaskOutcome::Discovered(DiscoveryResult::new(t, vec![x.clone()])),
        )];
        let (out, _) = fold(&items, &StubStore::default());
        assert!(out.relationships.contains(&x));
        let filters = out.targets.filters_for(&n("x")).unwrap();
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn fully_rejected_result_gets_terminal_marker() {
        let a = n("a");
        let items = [item(
            a.clone(),
            vec![Arc::new(NoneFilter)],
            TaskOutcome::Discovered(DiscoveryResult::new(
                a.clone(),
                vec![Relationship::dependency(a.clone(), n("b"))],
            )),
        )];
        let (out, _) = fold(&items, &StubStore::default());
        assert_eq!(out.relationships.len(), 1);
        let marker = out.relationships.iter().next().unwrap();
        assert!(marker.is_terminal());
        assert_eq!(marker.declaring, a);
        assert_eq!(marker.source, "test");
        assert!(out.targets.is_empty());
    }

    #[test]
    fn rejected_parent_is_forced_without_marker() {
        let a = n("a");
        let p = Relationship::parent(a.clone(), n("p"));
        let items = [item(
            a.clone(),
            vec![Arc::new(NoneFilter)],
            TaskOutcome::Discovered(DiscoveryResult::new(
                a.clone(),
                vec![p.clone(), Relationship::dependency(a, n("b"))],
            )),
        )];
        let (out, _) = fold(&items, &StubStore::default());
        assert_eq!(out.relationships.into_iter().collect::<Vec<_>>(), vec![p]);
        // Forced parents do not become todos.
        assert!(out.targets.is_empty());
    }

    #[test]
    fn already_present_targets_are_skipped() {
        let a = n("a");
        let store = StubStore {
            complete: [n("b")].into_iter().collect(),
        };
        let items = [item(
            a.clone(),
            vec![Arc::new(AnyFilter)],
            TaskOutcome::Discovered(DiscoveryResult::new(
                a.clone(),
                vec![Relationship::dependency(a, n("b"))],
            )),
        )];
        let (out, _) = fold(&items, &store);
        assert!(out.targets.is_empty());
        // Nothing contributed, so the node is still marked resolved.
        assert!(out.relationships.iter().all(Relationship::is_terminal));
    }

    #[test]
    fn empty_or_absent_relationship_lists_add_nothing() {
        let a = n("a");
        let items = [
            item(
                a.clone(),
                vec![Arc::new(AnyFilter)],
                TaskOutcome::Discovered(DiscoveryResult::new(a.clone(), Vec::new())),
            ),
            item(
                n("b"),
                vec![Arc::new(AnyFilter)],
                TaskOutcome::Discovered(DiscoveryResult::nothing_new(n("b"))),
            ),
        ];
        let (out, state) = fold(&items, &StubStore::default());
        assert!(out.relationships.is_empty());
        assert_eq!(out.discovered.len(), 2);
        assert!(state.missing.is_empty());
    }

    #[test]
    fn failures_mark_missing() {
        let items = [
            item(
                n("a"),
                vec![],
                TaskOutcome::Failed {
                    message: "boom".into(),
                    selected: None,
                },
            ),
            item(n("b"), vec![], TaskOutcome::NotFound),
            item(n("c"), vec![], TaskOutcome::NoDiscoverer),
        ];
        let (out, state) = fold(&items, &StubStore::default());
        assert_eq!(state.missing.len(), 3);
        assert_eq!(out.missing[0], (n("a"), "boom".to_string()));
    }

    #[test]
    fn failure_after_resolution_marks_both_refs_missing() {
        let range = n("a").with_version("[1,2)");
        let concrete = n("a").with_version("1.4");
        let items = [item(
            range.clone(),
            vec![],
            TaskOutcome::Failed {
                message: "unreadable".into(),
                selected: Some(concrete.clone()),
            },
        )];
        let (out, state) = fold(&items, &StubStore::default());
        assert!(state.missing.contains(&range));
        assert!(state.missing.contains(&concrete));
        assert_eq!(out.missing.len(), 2);
    }

    #[test]
    fn resolved_todo_records_selection_edge() {
        let range = n("a").with_version("[1,2)");
        let concrete = n("a").with_version("1.4");
        let items = [item(
            range.clone(),
            vec![Arc::new(AnyFilter)],
            TaskOutcome::Discovered(DiscoveryResult::nothing_new(concrete.clone())),
        )];
        let (out, _) = fold(&items, &StubStore::default());
        let selection = Relationship::selection("test", range, concrete);
        assert_eq!(out.relationships.into_iter().collect::<Vec<_>>(), vec![selection]);
    }
}
