//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`droidsync add`, `droidsync templates sync`)
//! - Shared initialization logic
//! - Consistent global flag handling

pub mod add;
pub mod agents;
pub mod android;
pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod remove;
pub mod templates;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_UNKNOWN_WORKSPACE};

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;
    use std::sync::Arc;

    use crate::service::WorkspaceService;
    use crate::state::{MemoryStore, WorkspaceRegistry};
    use crate::templates::TemplateCatalog;

    pub fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    pub fn service(templates: &Path) -> WorkspaceService {
        let registry = WorkspaceRegistry::open(Arc::new(MemoryStore::new())).unwrap();
        WorkspaceService::new(TemplateCatalog::with_root(templates), registry)
    }
}
