//! Controller-owned bookkeeping for one aggregation run.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use depgraph_core::errors::GraphResult;
use depgraph_core::traits::GraphStore;
use depgraph_core::types::{FxHashSet, NodeRef, Relationship};
use tracing::info;

/// Why a todo was not dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Missing,
    CycleParticipant,
    AlreadyDiscovered,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::CycleParticipant => "cycle-participant",
            Self::AlreadyDiscovered => "already-discovered",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sets that only grow during a run. Workers see `missing` through
/// snapshots; nothing here is shared with them.
#[derive(Debug, Default)]
pub struct RunState {
    pub missing: BTreeSet<NodeRef>,
    pub cycle_participants: BTreeSet<NodeRef>,
    /// Nodes already attempted (dispatched or skipped) this run.
    pub done: FxHashSet<NodeRef>,
}

impl RunState {
    pub fn new(cycle_participants: BTreeSet<NodeRef>) -> Self {
        Self {
            cycle_participants,
            ..Default::default()
        }
    }

    /// Read-only copy of `missing` for the tasks of one pass.
    pub fn missing_snapshot(&self) -> Arc<BTreeSet<NodeRef>> {
        Arc::new(self.missing.clone())
    }

    /// Record `nodes` as attempted. Later todos for them are dropped.
    pub fn mark_done(&mut self, nodes: impl IntoIterator<Item = NodeRef>) {
        self.done.extend(nodes);
    }

    pub fn is_done(&self, node: &NodeRef) -> bool {
        self.done.contains(node)
    }

    /// Mark `node` missing, and `original` too when the discoverer resolved
    /// the todo to a different ref. Returns the refs newly added.
    pub fn mark_missing(&mut self, node: &NodeRef, original: &NodeRef) -> Vec<NodeRef> {
        let mut added = Vec::new();
        if self.missing.insert(node.clone()) {
            info!(node = %node, "MISSING += node");
            added.push(node.clone());
        }
        if original != node && self.missing.insert(original.clone()) {
            info!(node = %original, "MISSING += original ref");
            added.push(original.clone());
        }
        added
    }

    /// Both endpoints of every rejected relationship become cycle participants.
    pub fn add_rejected(&mut self, rejected: &[Relationship]) {
        for rel in rejected {
            self.cycle_participants.insert(rel.declaring.clone());
            self.cycle_participants.insert(rel.target.clone());
        }
    }

    /// The reason `node` should not be dispatched, if any.
    pub fn skip_reason<G>(&self, node: &NodeRef, graph: &G) -> GraphResult<Option<SkipReason>>
    where
        G: GraphStore + ?Sized,
    {
        if self.missing.contains(node) {
            return Ok(Some(SkipReason::Missing));
        }
        if self.cycle_participants.contains(node) {
            return Ok(Some(SkipReason::CycleParticipant));
        }
        if graph.contains_graph(node)? {
            return Ok(Some(SkipReason::AlreadyDiscovered));
        }
        Ok(None)
    }
}
