//! Post-discovery result patchers.

pub mod registry;
pub mod self_dependency;

pub use registry::PatcherRegistry;
pub use self_dependency::SelfDependencyPatcher;
