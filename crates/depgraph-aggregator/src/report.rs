//! Summary of one aggregation run.

use std::collections::BTreeSet;
use std::time::Duration;

use depgraph_core::types::NodeRef;
use serde::Serialize;

/// What an `aggregate` call did. The graph itself carries the result;
/// callers still check `incomplete_subgraphs()` afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationReport {
    /// Passes started.
    pub passes: usize,
    /// Tasks dispatched across all passes.
    pub dispatched: usize,
    /// Tasks that returned a discovery result.
    pub discovered: usize,
    /// Edges added to the graph. Terminal markers are not counted.
    pub relationships_stored: usize,
    /// Relationships the graph refused because they would close a cycle.
    pub relationships_rejected: usize,
    pub missing: BTreeSet<NodeRef>,
    pub cycle_participants: BTreeSet<NodeRef>,
    /// The barrier wait was cancelled; the graph holds a partial result.
    pub interrupted: bool,
    /// Discovery was disabled, so the graph was left untouched.
    pub skipped_disabled: bool,
    pub elapsed: Duration,
}

impl AggregationReport {
    pub fn disabled() -> Self {
        Self {
            skipped_disabled: true,
            ..Default::default()
        }
    }

    /// Ran to its fixpoint without marking anything missing.
    pub fn is_clean(&self) -> bool {
        !self.interrupted && !self.skipped_disabled && self.missing.is_empty()
    }
}
