//! Typed, directed relationships between nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::NodeRef;

/// The kind of relationship a node declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    /// Ancestry edge. Always structurally required, regardless of filters.
    Parent,
    /// Ordinary dependency.
    Dependency,
    /// Build plugin.
    Plugin,
    /// Dependency of a build plugin.
    PluginDependency,
    /// Build extension.
    Extension,
    /// Imported bill of materials.
    Bom,
    /// A requested ref resolved to a concrete one. Recorded by the
    /// aggregator, never declared by a node and never filtered.
    Selection,
}

impl RelationshipType {
    /// Every type a node can declare.
    pub const ALL: [RelationshipType; 6] = [
        Self::Parent,
        Self::Dependency,
        Self::Plugin,
        Self::PluginDependency,
        Self::Extension,
        Self::Bom,
    ];

    /// Parse from string (matching the serde rename).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "parent" => Some(Self::Parent),
            "dependency" => Some(Self::Dependency),
            "plugin" => Some(Self::Plugin),
            "plugin_dependency" => Some(Self::PluginDependency),
            "extension" => Some(Self::Extension),
            "bom" => Some(Self::Bom),
            "selection" => Some(Self::Selection),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Dependency => "dependency",
            Self::Plugin => "plugin",
            Self::PluginDependency => "plugin_dependency",
            Self::Extension => "extension",
            Self::Bom => "bom",
            Self::Selection => "selection",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed, typed edge: `declaring` declares a relationship to `target`.
///
/// Relationships are add-only; once stored they are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Relationship {
    pub declaring: NodeRef,
    pub target: NodeRef,
    pub rel_type: RelationshipType,
    /// Declared in a management section (constraint) rather than concretely.
    #[serde(default)]
    pub managed: bool,
    /// Declaration order within the declaring node.
    #[serde(default)]
    pub index: u32,
    /// Where this relationship was discovered.
    #[serde(default)]
    pub source: String,
}

impl Relationship {
    pub fn new(declaring: NodeRef, target: NodeRef, rel_type: RelationshipType) -> Self {
        Self {
            declaring,
            target,
            rel_type,
            managed: false,
            index: 0,
            source: String::new(),
        }
    }

    pub fn dependency(declaring: NodeRef, target: NodeRef) -> Self {
        Self::new(declaring, target, RelationshipType::Dependency)
    }

    pub fn parent(declaring: NodeRef, target: NodeRef) -> Self {
        Self::new(declaring, target, RelationshipType::Parent)
    }

    /// Self-referential PARENT marker: records `node` as resolved without
    /// contributing any edge to another node.
    pub fn terminal_parent(source: impl Into<String>, node: NodeRef) -> Self {
        Self {
            declaring: node.clone(),
            target: node,
            rel_type: RelationshipType::Parent,
            managed: false,
            index: 0,
            source: source.into(),
        }
    }

    /// `requested` resolved to `selected`. Keeps the concrete ref reachable
    /// through the requested one.
    pub fn selection(source: impl Into<String>, requested: NodeRef, selected: NodeRef) -> Self {
        Self::new(requested, selected, RelationshipType::Selection).with_source(source)
    }

    pub fn with_managed(mut self, managed: bool) -> Self {
        self.managed = managed;
        self
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.rel_type == RelationshipType::Parent && self.declaring == self.target
    }

    pub fn is_selection(&self) -> bool {
        self.rel_type == RelationshipType::Selection
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}", self.declaring, self.rel_type)?;
        if self.managed {
            f.write_str(",managed")?;
        }
        write!(f, "]-> {}", self.target)
    }
}
