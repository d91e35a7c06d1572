//! Restricts traversal to a set of relationship types.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{FilterRef, RelationshipFilter};
use crate::types::{Relationship, RelationshipType};

/// Accepts relationships whose type is allowed, honoring the
/// managed/concrete switches.
#[derive(Debug, Clone)]
pub struct TypeFilter {
    allowed: BTreeSet<RelationshipType>,
    include_managed: bool,
    include_concrete: bool,
    id: String,
}

impl TypeFilter {
    pub fn new(
        allowed: impl IntoIterator<Item = RelationshipType>,
        include_managed: bool,
        include_concrete: bool,
    ) -> Self {
        let allowed: BTreeSet<_> = allowed.into_iter().collect();
        let names: Vec<&str> = allowed.iter().map(RelationshipType::as_str).collect();
        let id = format!(
            "TYPES[{}](managed={include_managed},concrete={include_concrete})",
            names.join(",")
        );
        Self {
            allowed,
            include_managed,
            include_concrete,
            id,
        }
    }

    /// Concrete relationships of the given types only.
    pub fn concrete(allowed: impl IntoIterator<Item = RelationshipType>) -> Self {
        Self::new(allowed, false, true)
    }
}

impl RelationshipFilter for TypeFilter {
    fn accept(&self, rel: &Relationship) -> bool {
        if !self.allowed.contains(&rel.rel_type) {
            return false;
        }
        if rel.managed {
            self.include_managed
        } else {
            self.include_concrete
        }
    }

    fn child_filter(self: Arc<Self>, _rel: &Relationship) -> FilterRef {
        self
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn allowed_types(&self) -> BTreeSet<RelationshipType> {
        self.allowed.clone()
    }

    fn include_managed(&self) -> bool {
        self.include_managed
    }

    fn include_concrete(&self) -> bool {
        self.include_concrete
    }
}
