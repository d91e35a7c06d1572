//! Limits how many hops away from the root traversal may go.

use std::sync::Arc;

use super::{FilterRef, RelationshipFilter};
use crate::types::Relationship;

/// Accepts relationships while fewer than `max_depth` hops have been taken.
/// Each accepted hop yields a filter one level deeper.
#[derive(Debug, Clone)]
pub struct DepthFilter {
    depth: usize,
    max_depth: usize,
    id: String,
}

impl DepthFilter {
    pub fn new(max_depth: usize) -> Self {
        Self::at(0, max_depth)
    }

    fn at(depth: usize, max_depth: usize) -> Self {
        Self {
            depth,
            max_depth,
            id: format!("DEPTH[{depth}/{max_depth}]"),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl RelationshipFilter for DepthFilter {
    fn accept(&self, _rel: &Relationship) -> bool {
        self.depth < self.max_depth
    }

    fn child_filter(self: Arc<Self>, _rel: &Relationship) -> FilterRef {
        Arc::new(Self::at(self.depth + 1, self.max_depth))
    }

    fn id(&self) -> &str {
        &self.id
    }
}
