//! Cycle records reported by the graph store.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{NodeRef, Relationship};

/// A cycle the store refused to close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    pub participants: BTreeSet<NodeRef>,
    /// The stored path plus the rejected closing relationship.
    pub relationships: Vec<Relationship>,
}

impl CycleRecord {
    pub fn from_relationships(relationships: Vec<Relationship>) -> Self {
        let participants = relationships
            .iter()
            .flat_map(|r| [r.declaring.clone(), r.target.clone()])
            .collect();
        Self {
            participants,
            relationships,
        }
    }

    pub fn contains(&self, node: &NodeRef) -> bool {
        self.participants.contains(node)
    }
}
