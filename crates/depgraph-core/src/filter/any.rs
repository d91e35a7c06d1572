//! Accept-everything and reject-everything filters.

use std::sync::Arc;

use super::{FilterRef, RelationshipFilter};
use crate::types::Relationship;

/// Accepts every relationship, managed or concrete.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyFilter;

impl RelationshipFilter for AnyFilter {
    fn accept(&self, _rel: &Relationship) -> bool {
        true
    }

    fn child_filter(self: Arc<Self>, _rel: &Relationship) -> FilterRef {
        self
    }

    fn id(&self) -> &str {
        "ANY"
    }

    fn include_managed(&self) -> bool {
        true
    }
}

/// Rejects every relationship.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneFilter;

impl RelationshipFilter for NoneFilter {
    fn accept(&self, _rel: &Relationship) -> bool {
        false
    }

    fn child_filter(self: Arc<Self>, _rel: &Relationship) -> FilterRef {
        self
    }

    fn id(&self) -> &str {
        "NONE"
    }

    fn allowed_types(&self) -> std::collections::BTreeSet<crate::types::RelationshipType> {
        Default::default()
    }

    fn include_concrete(&self) -> bool {
        false
    }
}
