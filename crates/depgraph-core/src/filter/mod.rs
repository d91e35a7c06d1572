//! Relationship filters.
//!
//! A filter decides whether a relationship is traversed and which filter
//! applies beyond it. Filters chain: accepting a relationship at node N
//! yields the filter used when discovering N's target. Identity for
//! deduplication is the filter's `id()`, never pointer identity.

pub mod any;
pub mod composite;
pub mod depth;
pub mod excluding;
pub mod type_filter;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::types::{Relationship, RelationshipType};

pub use any::{AnyFilter, NoneFilter};
pub use composite::{AndFilter, OrFilter};
pub use depth::DepthFilter;
pub use excluding::ExcludingFilter;
pub use type_filter::TypeFilter;

/// Shared handle to a filter.
pub type FilterRef = Arc<dyn RelationshipFilter>;

/// Acceptance policy for relationships, with a chained child policy.
pub trait RelationshipFilter: fmt::Debug + Send + Sync {
    /// Whether `rel` is traversed under this filter.
    fn accept(&self, rel: &Relationship) -> bool;

    /// Filter applied to the target of an accepted `rel`.
    /// Returning `self` means the policy is unchanged past this edge.
    fn child_filter(self: Arc<Self>, rel: &Relationship) -> FilterRef;

    /// Stable long identity used for deduplication.
    fn id(&self) -> &str;

    /// Short hash of `id()`, suitable for logs.
    fn condensed_id(&self) -> String {
        let hex = blake3::hash(self.id().as_bytes()).to_hex();
        hex.as_str()[..16].to_string()
    }

    fn allowed_types(&self) -> BTreeSet<RelationshipType> {
        RelationshipType::ALL.into_iter().collect()
    }

    fn include_managed(&self) -> bool {
        false
    }

    fn include_concrete(&self) -> bool {
        true
    }
}

/// Accepted-by-any set of filters, deduplicated by `id()`.
#[derive(Clone, Default)]
pub struct FilterSet {
    filters: BTreeMap<String, FilterRef>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(filter: FilterRef) -> Self {
        let mut set = Self::new();
        set.insert(filter);
        set
    }

    /// Insert unless a filter with the same id is already present.
    /// Returns true if the set grew.
    pub fn insert(&mut self, filter: FilterRef) -> bool {
        let id = filter.id().to_string();
        if self.filters.contains_key(&id) {
            return false;
        }
        self.filters.insert(id, filter);
        true
    }

    pub fn extend(&mut self, other: FilterSet) {
        for (id, filter) in other.filters {
            self.filters.entry(id).or_insert(filter);
        }
    }

    /// True if any member accepts `rel`.
    pub fn accepts_any(&self, rel: &Relationship) -> bool {
        self.filters.values().any(|f| f.accept(rel))
    }

    /// Child filters of every member that accepts `rel`.
    /// Empty when no member accepts.
    pub fn accepting_children(&self, rel: &Relationship) -> FilterSet {
        let mut children = FilterSet::new();
        for filter in self.filters.values() {
            if filter.accept(rel) {
                children.insert(Arc::clone(filter).child_filter(rel));
            }
        }
        children
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.filters.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterRef> {
        self.filters.values()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.filters.keys()).finish()
    }
}

impl FromIterator<FilterRef> for FilterSet {
    fn from_iter<I: IntoIterator<Item = FilterRef>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for filter in iter {
            set.insert(filter);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeRef;

    fn rel(rel_type: RelationshipType) -> Relationship {
        Relationship::new(
            NodeRef::new("g", "a", "1"),
            NodeRef::new("g", "b", "1"),
            rel_type,
        )
    }

    #[test]
    fn set_dedups_by_id() {
        let mut set = FilterSet::new();
        assert!(set.insert(Arc::new(AnyFilter)));
        assert!(!set.insert(Arc::new(AnyFilter)));
        assert!(set.insert(Arc::new(NoneFilter)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn accepting_children_skips_rejecting_members() {
        let set: FilterSet = [
            Arc::new(NoneFilter) as FilterRef,
            Arc::new(DepthFilter::new(2)) as FilterRef,
        ]
        .into_iter()
        .collect();

        let children = set.accepting_children(&rel(RelationshipType::Dependency));
        assert_eq!(children.len(), 1);
        assert!(children.contains_id("DEPTH[1/2]"));
    }

    #[test]
    fn condensed_id_is_stable_and_short() {
        let a = AnyFilter.condensed_id();
        assert_eq!(a, AnyFilter.condensed_id());
        assert_eq!(a.len(), 16);
        assert_ne!(a, NoneFilter.condensed_id());
    }
}
