//! Per-task result slots collected at the batch barrier.

use depgraph_core::models::DiscoveryResult;
use depgraph_core::types::NodeRef;

use crate::todo::DiscoveryTodo;

/// What one discovery task produced.
#[derive(Debug, Clone)]
pub enum TaskOutcome {
    Discovered(DiscoveryResult),
    /// The discoverer could not find the node.
    NotFound,
    /// The discoverer returned an error, possibly after resolving the todo's
    /// ref to `selected`.
    Failed {
        message: String,
        selected: Option<NodeRef>,
    },
    /// The node was already missing when the task ran.
    SkippedMissing,
    /// No discoverer is configured.
    NoDiscoverer,
    /// The discoverer panicked.
    Panicked(String),
    /// The task ended without recording an outcome.
    Aborted,
}

impl TaskOutcome {
    pub fn result(&self) -> Option<&DiscoveryResult> {
        match self {
            Self::Discovered(result) => Some(result),
            _ => None,
        }
    }

    /// The ref the discoverer resolved the todo to, if it said.
    pub fn selected(&self) -> Option<&NodeRef> {
        match self {
            Self::Discovered(result) => result.selected.as_ref(),
            Self::Failed { selected, .. } => selected.as_ref(),
            _ => None,
        }
    }

    /// Short description used for logging and missing-node events.
    pub fn reason(&self) -> &str {
        match self {
            Self::Discovered(_) => "discovered",
            Self::NotFound => "not found",
            Self::Failed { message, .. } | Self::Panicked(message) => message,
            Self::SkippedMissing => "already missing",
            Self::NoDiscoverer => "no discoverer",
            Self::Aborted => "aborted",
        }
    }
}

/// A finished task: its position in the batch, its todo, and its outcome.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub index: usize,
    pub todo: DiscoveryTodo,
    pub outcome: TaskOutcome,
}
