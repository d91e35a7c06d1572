//! AND / OR composition of filters.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{FilterRef, RelationshipFilter};
use crate::types::{Relationship, RelationshipType};

fn composite_id(op: &str, members: &[FilterRef]) -> String {
    let ids: Vec<&str> = members.iter().map(|m| m.id()).collect();
    format!("{op}({})", ids.join(" | "))
}

fn unchanged(before: &[FilterRef], after: &[FilterRef]) -> bool {
    before.len() == after.len() && before.iter().zip(after).all(|(b, a)| b.id() == a.id())
}

/// Accepts only when every member accepts.
#[derive(Debug, Clone)]
pub struct AndFilter {
    members: Vec<FilterRef>,
    id: String,
}

impl AndFilter {
    pub fn new(members: Vec<FilterRef>) -> Self {
        let id = composite_id("AND", &members);
        Self { members, id }
    }

    pub fn members(&self) -> &[FilterRef] {
        &self.members
    }
}

impl RelationshipFilter for AndFilter {
    fn accept(&self, rel: &Relationship) -> bool {
        self.members.iter().all(|m| m.accept(rel))
    }

    fn child_filter(self: Arc<Self>, rel: &Relationship) -> FilterRef {
        let children: Vec<FilterRef> = self
            .members
            .iter()
            .map(|m| Arc::clone(m).child_filter(rel))
            .collect();
        if unchanged(&self.members, &children) {
            return self;
        }
        Arc::new(Self::new(children))
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn allowed_types(&self) -> BTreeSet<RelationshipType> {
        let mut members = self.members.iter();
        let Some(first) = members.next() else {
            return RelationshipType::ALL.into_iter().collect();
        };
        members.fold(first.allowed_types(), |acc, m| {
            acc.intersection(&m.allowed_types()).copied().collect()
        })
    }

    fn include_managed(&self) -> bool {
        self.members.iter().all(|m| m.include_managed())
    }

    fn include_concrete(&self) -> bool {
        self.members.iter().all(|m| m.include_concrete())
    }
}

/// Accepts when any member accepts. Past an accepted edge, only the
/// members that accepted it keep traversing.
#[derive(Debug, Clone)]
pub struct OrFilter {
    members: Vec<FilterRef>,
    id: String,
}

impl OrFilter {
    pub fn new(members: Vec<FilterRef>) -> Self {
        let id = composite_id("OR", &members);
        Self { members, id }
    }

    pub fn members(&self) -> &[FilterRef] {
        &self.members
    }
}

impl RelationshipFilter for OrFilter {
    fn accept(&self, rel: &Relationship) -> bool {
        self.members.iter().any(|m| m.accept(rel))
    }

    fn child_filter(self: Arc<Self>, rel: &Relationship) -> FilterRef {
        let children: Vec<FilterRef> = self
            .members
            .iter()
            .filter(|m| m.accept(rel))
            .map(|m| Arc::clone(m).child_filter(rel))
            .collect();
        if unchanged(&self.members, &children) {
            return self;
        }
        if let [only] = children.as_slice() {
            return Arc::clone(only);
        }
        Arc::new(Self::new(children))
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn allowed_types(&self) -> BTreeSet<RelationshipType> {
        self.members.iter().flat_map(|m| m.allowed_types()).collect()
    }

    fn include_managed(&self) -> bool {
        self.members.iter().any(|m| m.include_managed())
    }

    fn include_concrete(&self) -> bool {
        self.members.iter().any(|m| m.include_concrete())
    }
}
