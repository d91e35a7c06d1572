//! Property tests for filter chaining and node refs.

use std::sync::Arc;

use depgraph_core::filter::{AnyFilter, DepthFilter, ExcludingFilter, FilterRef, FilterSet};
use depgraph_core::types::{NodeRef, Relationship};
use proptest::prelude::*;

fn node(i: usize) -> NodeRef {
    NodeRef::new("org.test", format!("n{i}"), "1.0")
}

/// Walk a straight chain n0 -> n1 -> ... and count accepted hops.
fn accepted_hops(top: FilterRef, len: usize) -> usize {
    let mut filter = top;
    let mut hops = 0;
    for i in 0..len {
        let rel = Relationship::dependency(node(i), node(i + 1));
        if !filter.accept(&rel) {
            break;
        }
        filter = filter.child_filter(&rel);
        hops += 1;
    }
    hops
}

proptest! {
    #[test]
    fn depth_filter_accepts_exactly_max_depth_hops(max in 0usize..8, len in 0usize..12) {
        let hops = accepted_hops(Arc::new(DepthFilter::new(max)), len);
        prop_assert_eq!(hops, max.min(len));
    }

    #[test]
    fn excluding_filter_stops_at_first_excluded_node(excluded in 1usize..10, len in 1usize..12) {
        let top: FilterRef = Arc::new(ExcludingFilter::new([node(excluded)], Arc::new(AnyFilter)));
        let hops = accepted_hops(top, len);
        prop_assert_eq!(hops, (excluded - 1).min(len));
    }

    #[test]
    fn filter_set_keeps_one_entry_per_id(depths in proptest::collection::vec(0usize..4, 0..20)) {
        let mut set = FilterSet::new();
        for depth in &depths {
            set.insert(Arc::new(DepthFilter::new(*depth)));
        }
        let distinct: std::collections::BTreeSet<_> = depths.iter().collect();
        prop_assert_eq!(set.len(), distinct.len());
    }

    #[test]
    fn node_ref_display_parses_back(
        group in "[a-z][a-z.]{0,8}",
        name in "[a-z][a-z0-9-]{0,8}",
        version in "[0-9][0-9.]{0,5}",
    ) {
        let r = NodeRef::new(group, name, version);
        prop_assert_eq!(NodeRef::parse(&r.to_string()), Some(r));
    }
}
