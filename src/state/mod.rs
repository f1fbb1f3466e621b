//! Persistent workspace state.
//!
//! [`store`] provides the key-value document the registry is kept in;
//! [`registry`] reconciles and persists workspace descriptors.

pub mod registry;
pub mod store;

pub use registry::{dedupe, UpsertOutcome, WorkspaceRegistry, PROJECTS_KEY};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
