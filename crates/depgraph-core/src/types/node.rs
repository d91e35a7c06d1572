//! `NodeRef`: the identity of one versioned graph node.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, immutable identity of a graph node: `group:name:version`.
///
/// The version may be a concrete version (`1.0`) or a range spec
/// (`[1.0,2.0)`); discoverers resolve ranges to a concrete selected ref.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl NodeRef {
    pub fn new(group: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Parse `group:name:version`. Returns `None` if any part is missing or empty.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.splitn(3, ':');
        let group = parts.next().filter(|p| !p.is_empty())?;
        let name = parts.next().filter(|p| !p.is_empty())?;
        let version = parts.next().filter(|p| !p.is_empty())?;
        Some(Self::new(group, name, version))
    }

    /// Versionless `group:name` key.
    pub fn project_key(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }

    /// True when the version is a range spec rather than a concrete version.
    pub fn is_version_range(&self) -> bool {
        self.version.starts_with('[') || self.version.starts_with('(') || self.version.contains(',')
    }

    /// Same project at a different version.
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self::new(self.group.clone(), self.name.clone(), version)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}
