//! Tests for relationship filters and filter chaining.

use std::sync::Arc;

use depgraph_core::filter::{
    AndFilter, AnyFilter, DepthFilter, ExcludingFilter, FilterRef, FilterSet, NoneFilter,
    OrFilter, RelationshipFilter, TypeFilter,
};
use depgraph_core::types::{NodeRef, Relationship, RelationshipType};

fn node(name: &str) -> NodeRef {
    NodeRef::new("org.test", name, "1.0")
}

fn dep(from: &str, to: &str) -> Relationship {
    Relationship::dependency(node(from), node(to))
}

#[test]
fn any_filter_returns_itself_as_child() {
    let any: FilterRef = Arc::new(AnyFilter);
    let child = Arc::clone(&any).child_filter(&dep("a", "b"));
    assert!(Arc::ptr_eq(&any, &child));
    assert!(child.accept(&dep("b", "c")));
}

#[test]
fn none_filter_rejects_parents_too() {
    let rel = Relationship::parent(node("a"), node("p"));
    assert!(!NoneFilter.accept(&rel));
}

#[test]
fn type_filter_honors_managed_switch() {
    let filter = TypeFilter::concrete([RelationshipType::Dependency]);
    assert!(filter.accept(&dep("a", "b")));
    assert!(!filter.accept(&dep("a", "b").with_managed(true)));
    assert!(!filter.accept(&Relationship::new(
        node("a"),
        node("b"),
        RelationshipType::Plugin
    )));

    let managed = TypeFilter::new([RelationshipType::Dependency], true, false);
    assert!(managed.accept(&dep("a", "b").with_managed(true)));
    assert!(!managed.accept(&dep("a", "b")));
}

#[test]
fn excluding_filter_rejects_excluded_targets() {
    let filter = ExcludingFilter::new([node("banned")], Arc::new(AnyFilter));
    assert!(filter.accept(&dep("a", "b")));
    assert!(!filter.accept(&dep("a", "banned")));
}

#[test]
fn excluding_filter_returns_self_when_delegate_unchanged() {
    let filter: FilterRef = Arc::new(ExcludingFilter::new([node("x")], Arc::new(AnyFilter)));
    let child = Arc::clone(&filter).child_filter(&dep("a", "b"));
    assert_eq!(child.id(), filter.id());
}

#[test]
fn excluding_filter_wraps_changed_delegate() {
    let filter: FilterRef =
        Arc::new(ExcludingFilter::new([node("x")], Arc::new(DepthFilter::new(3))));
    let child = Arc::clone(&filter).child_filter(&dep("a", "b"));
    assert_ne!(child.id(), filter.id());
    assert!(child.id().contains("DEPTH[1/3]"));
    // Exclusion survives the hop.
    assert!(!child.accept(&dep("b", "x")));
}

#[test]
fn depth_filter_stops_after_max_hops() {
    let root: FilterRef = Arc::new(DepthFilter::new(2));
    let one = Arc::clone(&root).child_filter(&dep("a", "b"));
    let two = Arc::clone(&one).child_filter(&dep("b", "c"));
    assert!(root.accept(&dep("a", "b")));
    assert!(one.accept(&dep("b", "c")));
    assert!(!two.accept(&dep("c", "d")));
}

#[test]
fn and_filter_requires_all_members() {
    let filter = AndFilter::new(vec![
        Arc::new(TypeFilter::concrete([RelationshipType::Dependency])),
        Arc::new(ExcludingFilter::new([node("x")], Arc::new(AnyFilter))),
    ]);
    assert!(filter.accept(&dep("a", "b")));
    assert!(!filter.accept(&dep("a", "x")));
    assert!(!filter.accept(&Relationship::parent(node("a"), node("b"))));
    assert_eq!(
        filter.allowed_types().into_iter().collect::<Vec<_>>(),
        vec![RelationshipType::Dependency]
    );
}

#[test]
fn or_filter_keeps_only_accepting_members_past_an_edge() {
    let filter: FilterRef = Arc::new(OrFilter::new(vec![
        Arc::new(TypeFilter::concrete([RelationshipType::Parent])),
        Arc::new(DepthFilter::new(1)),
    ]));
    let rel = dep("a", "b");
    assert!(filter.accept(&rel));

    // Only the depth filter accepted, so it alone carries on.
    let child = Arc::clone(&filter).child_filter(&rel);
    assert_eq!(child.id(), "DEPTH[1/1]");
}

#[test]
fn or_filter_returns_self_when_nothing_changes() {
    let filter: FilterRef = Arc::new(OrFilter::new(vec![
        Arc::new(AnyFilter),
        Arc::new(TypeFilter::concrete([RelationshipType::Dependency])),
    ]));
    let child = Arc::clone(&filter).child_filter(&dep("a", "b"));
    assert_eq!(child.id(), filter.id());
}

#[test]
fn filter_set_union_semantics() {
    let set: FilterSet = [
        Arc::new(ExcludingFilter::new([node("b")], Arc::new(AnyFilter))) as FilterRef,
        Arc::new(AnyFilter) as FilterRef,
    ]
    .into_iter()
    .collect();

    // One member rejects, one accepts: the set accepts.
    assert!(set.accepts_any(&dep("a", "b")));
    let children = set.accepting_children(&dep("a", "b"));
    assert_eq!(children.ids().collect::<Vec<_>>(), vec!["ANY"]);
}

#[test]
fn filter_set_extend_keeps_first_instance_per_id() {
    let mut left = FilterSet::single(Arc::new(AnyFilter));
    let right: FilterSet = [
        Arc::new(AnyFilter) as FilterRef,
        Arc::new(NoneFilter) as FilterRef,
    ]
    .into_iter()
    .collect();
    left.extend(right);
    assert_eq!(left.len(), 2);
}
