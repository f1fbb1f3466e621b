//! Template catalog, synchronization, and Android scaffolding.
//!
//! - [`catalog`] locates the template root and enumerates its assets
//! - [`sync`] copies general templates into a workspace
//! - [`scaffold`] renders the `android/` subtree into a workspace
//! - [`agents`] reads and writes the shared `AGENTS.md`

pub mod agents;
pub mod catalog;
pub mod render;
pub mod scaffold;
pub mod sync;

pub use agents::{load_agents, save_agents, AGENTS_FILE};
pub use catalog::{TemplateCatalog, TemplateDescriptor, TemplateMode};
pub use render::{HandlebarsRenderer, RenderContext, TemplateRenderer};
pub use scaffold::{AndroidScaffoldGenerator, ScaffoldOutcome, ScaffoldSummary};
pub use sync::{
    SyncMode, SyncProgress, SyncRequest, SyncResult, SyncState, TemplateStatusMap,
    TemplateSyncEngine,
};
