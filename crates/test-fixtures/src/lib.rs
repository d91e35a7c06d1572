//! Test fixtures for the depgraph workspace: ref and relationship builders,
//! a scripted discoverer, a recording event handler, and JSON graph
//! scenarios loaded from `data/`.

pub mod discoverer;
pub mod events;

use std::path::PathBuf;

use depgraph_core::types::{NodeRef, Relationship, RelationshipType};
use serde::de::DeserializeOwned;

pub use discoverer::{Script, ScriptedDiscoverer};
pub use events::RecordingHandler;

/// Group used by every ref built with [`nref`].
pub const TEST_GROUP: &str = "org.test";

/// `org.test:<name>:1.0`
pub fn nref(name: &str) -> NodeRef {
    NodeRef::new(TEST_GROUP, name, "1.0")
}

/// `org.test:<name>:<version>`
pub fn nref_v(name: &str, version: &str) -> NodeRef {
    NodeRef::new(TEST_GROUP, name, version)
}

pub fn dep(from: &NodeRef, to: &NodeRef) -> Relationship {
    Relationship::dependency(from.clone(), to.clone())
}

pub fn parent(from: &NodeRef, to: &NodeRef) -> Relationship {
    Relationship::parent(from.clone(), to.clone())
}

pub fn rel(from: &NodeRef, to: &NodeRef, rel_type: RelationshipType) -> Relationship {
    Relationship::new(from.clone(), to.clone(), rel_type)
}

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}
