//! `ScriptedDiscoverer`: a `Discoverer` driven by per-node scripts.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use depgraph_core::config::DiscoveryConfig;
use depgraph_core::errors::DiscoveryError;
use depgraph_core::models::DiscoveryResult;
use depgraph_core::traits::Discoverer;
use depgraph_core::types::{NodeRef, Relationship, RelationshipType};
use serde::Deserialize;

/// What the discoverer does when asked about one node.
#[derive(Debug, Clone)]
pub enum Script {
    /// Found; `selected` overrides the requested ref when set.
    Found {
        selected: Option<NodeRef>,
        relationships: Vec<Relationship>,
        metadata: BTreeMap<String, String>,
    },
    /// Found, with nothing new to add.
    NothingNew,
    /// `Ok(None)`.
    NotFound,
    /// `Err(DiscoveryError::Failed)`, optionally after resolving to `selected`.
    Fail {
        selected: Option<NodeRef>,
        message: String,
    },
    /// Panics inside the discoverer.
    Panic(String),
}

/// Discoverer whose answers are fixed up front. Unscripted nodes are not
/// found. Every call is counted per requested ref.
#[derive(Debug, Default)]
pub struct ScriptedDiscoverer {
    scripts: BTreeMap<NodeRef, Script>,
    delays: BTreeMap<NodeRef, Duration>,
    calls: Mutex<BTreeMap<NodeRef, usize>>,
}

impl ScriptedDiscoverer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, node: NodeRef, script: Script) -> Self {
        self.scripts.insert(node, script);
        self
    }

    /// `node` declares `relationships`.
    pub fn with_relationships(self, node: NodeRef, relationships: Vec<Relationship>) -> Self {
        self.script(
            node,
            Script::Found {
                selected: None,
                relationships,
                metadata: BTreeMap::new(),
            },
        )
    }

    /// `node` resolves to `selected`, which declares `relationships`.
    pub fn with_selected(self, node: NodeRef, selected: NodeRef, relationships: Vec<Relationship>) -> Self {
        self.script(
            node,
            Script::Found {
                selected: Some(selected),
                relationships,
                metadata: BTreeMap::new(),
            },
        )
    }

    /// Adds metadata to an existing `Found` script for `node`.
    pub fn with_metadata(mut self, node: &NodeRef, key: &str, value: &str) -> Self {
        if let Some(Script::Found { metadata, .. }) = self.scripts.get_mut(node) {
            metadata.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn failing(self, node: NodeRef, message: &str) -> Self {
        self.script(
            node,
            Script::Fail {
                selected: None,
                message: message.to_string(),
            },
        )
    }

    /// `node` resolves to `selected`, then discovery of it fails.
    pub fn failing_after_selecting(self, node: NodeRef, selected: NodeRef, message: &str) -> Self {
        self.script(
            node,
            Script::Fail {
                selected: Some(selected),
                message: message.to_string(),
            },
        )
    }

    pub fn panicking(self, node: NodeRef) -> Self {
        let message = format!("scripted panic for {node}");
        self.script(node, Script::Panic(message))
    }

    pub fn nothing_new(self, node: NodeRef) -> Self {
        self.script(node, Script::NothingNew)
    }

    /// Sleep before answering for `node`.
    pub fn with_delay(mut self, node: NodeRef, delay: Duration) -> Self {
        self.delays.insert(node, delay);
        self
    }

    /// Build from a JSON scenario under `data/`.
    pub fn from_fixture(relative_path: &str) -> Self {
        let scenario: ScenarioFixture = crate::load_fixture(relative_path);
        scenario.into_discoverer()
    }

    pub fn calls(&self, node: &NodeRef) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.get(node).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().map(|calls| calls.values().sum()).unwrap_or(0)
    }

    /// Refs requested more than once.
    pub fn repeated_calls(&self) -> Vec<NodeRef> {
        self.calls
            .lock()
            .map(|calls| {
                calls
                    .iter()
                    .filter(|(_, n)| **n > 1)
                    .map(|(node, _)| node.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Discoverer for ScriptedDiscoverer {
    fn discover_relationships(
        &self,
        node: &NodeRef,
        _config: &DiscoveryConfig,
        _store_directly: bool,
    ) -> Result<Option<DiscoveryResult>, DiscoveryError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(node.clone()).or_insert(0) += 1;
        }
        if let Some(delay) = self.delays.get(node) {
            thread::sleep(*delay);
        }

        match self.scripts.get(node) {
            None | Some(Script::NotFound) => Ok(None),
            Some(Script::NothingNew) => Ok(Some(DiscoveryResult::nothing_new(node.clone()))),
            Some(Script::Fail {
                selected: None,
                message,
            }) => Err(DiscoveryError::failed(node, message.clone())),
            Some(Script::Fail {
                selected: Some(selected),
                message,
            }) => Err(DiscoveryError::failed_after_selecting(
                node,
                selected.clone(),
                message.clone(),
            )),
            Some(Script::Panic(message)) => panic!("{message}"),
            Some(Script::Found {
                selected,
                relationships,
                metadata,
            }) => {
                let selected = selected.clone().unwrap_or_else(|| node.clone());
                let mut result = DiscoveryResult::new(selected, relationships.clone());
                if !metadata.is_empty() {
                    result.metadata = Some(metadata.clone());
                }
                Ok(Some(result))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScenarioFixture {
    nodes: Vec<NodeFixture>,
}

#[derive(Debug, Deserialize)]
struct NodeFixture {
    node: String,
    #[serde(default)]
    selected: Option<String>,
    #[serde(default)]
    relationships: Vec<RelationshipFixture>,
    #[serde(default)]
    metadata: BTreeMap<String, String>,
    #[serde(default)]
    fail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RelationshipFixture {
    target: String,
    #[serde(rename = "type", default = "default_rel_type")]
    rel_type: RelationshipType,
    #[serde(default)]
    managed: bool,
}

fn default_rel_type() -> RelationshipType {
    RelationshipType::Dependency
}

fn parse_ref(s: &str) -> NodeRef {
    NodeRef::parse(s).unwrap_or_else(|| panic!("invalid node ref in fixture: {s}"))
}

impl ScenarioFixture {
    fn into_discoverer(self) -> ScriptedDiscoverer {
        let mut discoverer = ScriptedDiscoverer::new();
        for entry in self.nodes {
            let node = parse_ref(&entry.node);
            if let Some(message) = entry.fail {
                discoverer = discoverer.failing(node, &message);
                continue;
            }
            let selected = entry.selected.as_deref().map(parse_ref);
            let declaring = selected.clone().unwrap_or_else(|| node.clone());
            let relationships = entry
                .relationships
                .into_iter()
                .enumerate()
                .map(|(i, r)| {
                    Relationship::new(declaring.clone(), parse_ref(&r.target), r.rel_type)
                        .with_managed(r.managed)
                        .with_index(i as u32)
                })
                .collect();
            discoverer = discoverer.script(
                node,
                Script::Found {
                    selected,
                    relationships,
                    metadata: entry.metadata,
                },
            );
        }
        discoverer
    }
}
