//! Per-node discovery failures. Always recovered locally by the aggregator.

use super::error_code::{self, DepgraphErrorCode};
use crate::types::NodeRef;

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("invalid version spec for {node}: {message}")]
    InvalidVersionSpec { node: String, message: String },

    #[error("I/O failure discovering {node}: {message}")]
    Io { node: String, message: String },

    /// `selected` is the concrete ref the requested one resolved to before
    /// discovery of it failed, if resolution got that far.
    #[error("discovery failed for {node}: {message}")]
    Failed {
        node: String,
        selected: Option<NodeRef>,
        message: String,
    },
}

impl DiscoveryError {
    pub fn failed(node: impl ToString, message: impl Into<String>) -> Self {
        Self::Failed {
            node: node.to_string(),
            selected: None,
            message: message.into(),
        }
    }

    /// Discovery of `node` resolved it to `selected`, then failed.
    pub fn failed_after_selecting(node: impl ToString, selected: NodeRef, message: impl Into<String>) -> Self {
        Self::Failed {
            node: node.to_string(),
            selected: Some(selected),
            message: message.into(),
        }
    }

    /// The resolved ref carried by a failure, if any.
    pub fn selected(&self) -> Option<&NodeRef> {
        match self {
            Self::Failed { selected, .. } => selected.as_ref(),
            _ => None,
        }
    }
}

impl DepgraphErrorCode for DiscoveryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidVersionSpec { .. } => error_code::INVALID_VERSION_SPEC,
            Self::Io { .. } => error_code::DISCOVERY_IO,
            Self::Failed { .. } => error_code::DISCOVERY_FAILED,
        }
    }
}
