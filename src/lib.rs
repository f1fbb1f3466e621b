//! droidsync - Android workspace detection and template synchronization.
//!
//! droidsync keeps a registry of local Android project directories and
//! keeps them aligned with a shared directory of template files: general
//! templates are copied into a workspace verbatim, and the `android/`
//! subtree is rendered into a package-aware project scaffold.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration file and home directory resolution
//! - [`detection`] - Build-file parsing, module discovery, package detection
//! - [`error`] - Error types and result aliases
//! - [`service`] - Request surface tying the other modules together
//! - [`state`] - Persistent key-value store and the workspace registry
//! - [`templates`] - Template catalog, sync engine, and scaffold generator
//! - [`ui`] - Terminal output and progress display
//! - [`workspace`] - Workspace descriptors, identifiers, and resolution
//!
//! # Example
//!
//! ```
//! use droidsync::workspace::{normalize_package, workspace_id};
//! use std::path::Path;
//!
//! assert_eq!(
//!     normalize_package(Some(" Com.Example.App ")),
//!     Some("com.example.app".to_string())
//! );
//! let id = workspace_id(Path::new("/projects/demo"));
//! assert_eq!(id, workspace_id(Path::new("/projects/demo/")));
//! ```
//!
//! For end-to-end flows over temporary directories, see the integration tests.

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod service;
pub mod state;
pub mod templates;
pub mod ui;
pub mod workspace;

pub use error::{DroidsyncError, Result};
pub use service::WorkspaceService;
pub use state::WorkspaceRegistry;
pub use templates::{SyncMode, SyncRequest, TemplateCatalog};
pub use workspace::{WorkspaceDescriptor, WorkspaceResolver};
