//! Node identities, relationship types, and collection aliases.

pub mod collections;
pub mod node;
pub mod relationship;

pub use collections::{FxHashMap, FxHashSet};
pub use node::NodeRef;
pub use relationship::{Relationship, RelationshipType};
