//! Outcome of one successful discovery attempt.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{NodeRef, Relationship};

/// What a discoverer found for one node.
///
/// `selected` may differ from the requested ref when the discoverer resolved
/// a version range to a concrete version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryResult {
    pub selected: Option<NodeRef>,
    /// `None` means "nothing new"; an empty list means "no relationships".
    pub accepted: Option<Vec<Relationship>>,
    /// Annotations attached to the selected node regardless of filtering.
    pub metadata: Option<BTreeMap<String, String>>,
}

impl DiscoveryResult {
    pub fn new(selected: NodeRef, accepted: Vec<Relationship>) -> Self {
        Self {
            selected: Some(selected),
            accepted: Some(accepted),
            metadata: None,
        }
    }

    /// A result that found the node but has nothing new to add.
    pub fn nothing_new(selected: NodeRef) -> Self {
        Self {
            selected: Some(selected),
            accepted: None,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// The selected ref, falling back to the requested one.
    pub fn selected_or<'a>(&'a self, requested: &'a NodeRef) -> &'a NodeRef {
        self.selected.as_ref().unwrap_or(requested)
    }

    pub fn relationship_count(&self) -> usize {
        self.accepted.as_ref().map_or(0, Vec::len)
    }
}
