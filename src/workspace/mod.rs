//! Workspace descriptors, identity, and resolution.
//!
//! A workspace is a directory tree holding one Android-capable project.
//! [`WorkspaceResolver`] scans a root and produces a [`WorkspaceDescriptor`];
//! the registry in [`crate::state`] persists it.

pub mod descriptor;
pub mod id;
pub mod resolver;

pub use descriptor::{
    normalize_package, AndroidTemplateStatus, PackageSource, WorkspaceDescriptor,
};
pub use id::{derive_name, normalize_root, workspace_id};
pub use resolver::WorkspaceResolver;
