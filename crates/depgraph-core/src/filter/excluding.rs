//! Excludes whole subgraphs by target ref, delegating everything else.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{FilterRef, RelationshipFilter};
use crate::types::{NodeRef, Relationship, RelationshipType};

/// Rejects relationships targeting an excluded node; otherwise defers to
/// the wrapped filter. The exclusion is carried down the whole chain.
#[derive(Debug, Clone)]
pub struct ExcludingFilter {
    excluded: Arc<BTreeSet<NodeRef>>,
    inner: FilterRef,
    id: String,
}

impl ExcludingFilter {
    pub fn new(excluded: impl IntoIterator<Item = NodeRef>, inner: FilterRef) -> Self {
        Self::with_shared(Arc::new(excluded.into_iter().collect()), inner)
    }

    fn with_shared(excluded: Arc<BTreeSet<NodeRef>>, inner: FilterRef) -> Self {
        let names: Vec<String> = excluded.iter().map(ToString::to_string).collect();
        let id = format!(
            "EXCLUDE[{}] -> {}",
            names.join(","),
            inner.id()
        );
        Self {
            excluded,
            inner,
            id,
        }
    }

    pub fn excluded(&self) -> &BTreeSet<NodeRef> {
        &self.excluded
    }
}

impl RelationshipFilter for ExcludingFilter {
    fn accept(&self, rel: &Relationship) -> bool {
        !self.excluded.contains(&rel.target) && self.inner.accept(rel)
    }

    fn child_filter(self: Arc<Self>, rel: &Relationship) -> FilterRef {
        let child = Arc::clone(&self.inner).child_filter(rel);
        if child.id() == self.inner.id() {
            return self;
        }
        Arc::new(Self::with_shared(Arc::clone(&self.excluded), child))
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn allowed_types(&self) -> BTreeSet<RelationshipType> {
        self.inner.allowed_types()
    }

    fn include_managed(&self) -> bool {
        self.inner.include_managed()
    }

    fn include_concrete(&self) -> bool {
        self.inner.include_concrete()
    }
}
