//! Relationship paths from a root to some node.

use serde::{Deserialize, Serialize};

use crate::types::{NodeRef, Relationship};

/// An ordered chain of relationships starting at a root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphPath {
    pub relationships: Vec<Relationship>,
}

impl GraphPath {
    pub fn new(relationships: Vec<Relationship>) -> Self {
        Self { relationships }
    }

    /// Final target, or `None` for an empty path.
    pub fn target(&self) -> Option<&NodeRef> {
        self.relationships.last().map(|r| &r.target)
    }

    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Relationship> {
        self.relationships.iter()
    }
}
