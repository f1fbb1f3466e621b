//! Workspace service facade.
//!
//! [`WorkspaceService`] is the single entry point front ends call: it owns
//! the template catalog and the workspace registry, and republishes sync
//! progress on a broadcast channel so any number of observers can follow a
//! run by its `run_id`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::config::Settings;
use crate::error::{DroidsyncError, Result};
use crate::state::{JsonFileStore, KeyValueStore, WorkspaceRegistry};
use crate::templates::{
    self, AndroidScaffoldGenerator, HandlebarsRenderer, ScaffoldSummary, SyncProgress,
    SyncRequest, SyncResult, TemplateCatalog, TemplateRenderer, TemplateStatusMap,
    TemplateSyncEngine,
};
use crate::workspace::{WorkspaceDescriptor, WorkspaceResolver};

/// Buffered progress events per subscriber before the oldest are dropped.
const PROGRESS_CAPACITY: usize = 256;

/// Asks the user for a directory.
pub trait DirectoryPicker: Send + Sync {
    /// The chosen directory, or `None` when cancelled.
    fn pick_directory(&self) -> Option<PathBuf>;
}

/// A picker that always returns the same answer.
#[derive(Debug, Clone, Default)]
pub struct FixedPicker(pub Option<PathBuf>);

impl DirectoryPicker for FixedPicker {
    fn pick_directory(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

/// Result of a scaffold check or generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldActionResult {
    pub summary: ScaffoldSummary,
    /// Files written; absent for a check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub written: Option<usize>,
    /// The workspace as stored after the status refresh.
    pub project: WorkspaceDescriptor,
}

/// Binds detection, templates, and persistence together.
pub struct WorkspaceService {
    catalog: TemplateCatalog,
    registry: WorkspaceRegistry,
    renderer: Box<dyn TemplateRenderer>,
    progress: broadcast::Sender<SyncProgress>,
}

impl WorkspaceService {
    /// Create a service over an explicit catalog and registry.
    pub fn new(catalog: TemplateCatalog, registry: WorkspaceRegistry) -> Self {
        let (progress, _) = broadcast::channel(PROGRESS_CAPACITY);
        Self {
            catalog,
            registry,
            renderer: Box::new(HandlebarsRenderer::new()),
            progress,
        }
    }

    /// Create a service from loaded settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(settings.store_path()));
        let registry = WorkspaceRegistry::open(store)?;
        let catalog = TemplateCatalog::new(settings.template_candidates());
        Ok(Self::new(catalog, registry))
    }

    /// Replace the scaffold renderer.
    pub fn with_renderer(mut self, renderer: impl TemplateRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// The template catalog.
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// The workspace registry.
    pub fn registry(&self) -> &WorkspaceRegistry {
        &self.registry
    }

    /// Follow sync progress events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncProgress> {
        self.progress.subscribe()
    }

    /// Ask `picker` for a directory and register it.
    pub async fn pick_workspace(
        &self,
        picker: &dyn DirectoryPicker,
    ) -> Result<Option<WorkspaceDescriptor>> {
        match picker.pick_directory() {
            Some(dir) => self.add_workspace(&dir).await.map(Some),
            None => {
                tracing::debug!("Directory pick cancelled");
                Ok(None)
            }
        }
    }

    /// Resolve and register the workspace rooted at `path`.
    pub async fn add_workspace(&self, path: &Path) -> Result<WorkspaceDescriptor> {
        let root = tokio::fs::canonicalize(path).await.map_err(|_| {
            DroidsyncError::invalid_input(format!("not a directory: {}", path.display()))
        })?;
        if !tokio::fs::metadata(&root).await?.is_dir() {
            return Err(DroidsyncError::invalid_input(format!(
                "not a directory: {}",
                path.display()
            )));
        }

        let descriptor = WorkspaceResolver::resolve(&root).await;
        for warning in &descriptor.warnings {
            tracing::warn!("{}: {}", descriptor.name, warning);
        }
        Ok(self.registry.upsert(descriptor)?.descriptor)
    }

    /// Every registered workspace.
    pub fn list_workspaces(&self) -> Vec<WorkspaceDescriptor> {
        self.registry.get_all()
    }

    /// Forget a workspace; false when the id was unknown.
    pub fn remove_workspace(&self, id: &str) -> Result<bool> {
        self.registry.delete(id)
    }

    /// Presence of each general template in `root`.
    pub async fn check_templates(&self, root: &Path) -> Result<TemplateStatusMap> {
        TemplateSyncEngine::new(&self.catalog).check(root).await
    }

    /// Paths a sync request would process, in order.
    pub async fn plan_sync(&self, request: &SyncRequest) -> Result<Vec<String>> {
        TemplateSyncEngine::new(&self.catalog).select(request).await
    }

    /// Run a sync, publishing progress to subscribers.
    pub async fn sync_templates(&self, request: &SyncRequest) -> Result<SyncResult> {
        let progress = self.progress.clone();
        TemplateSyncEngine::new(&self.catalog)
            .sync(request, move |event| {
                let _ = progress.send(event);
            })
            .await
    }

    fn generator(&self) -> AndroidScaffoldGenerator<'_> {
        AndroidScaffoldGenerator::new(&self.catalog, self.renderer.as_ref())
    }

    fn refresh_status(
        &self,
        mut workspace: WorkspaceDescriptor,
        summary: &ScaffoldSummary,
    ) -> Result<WorkspaceDescriptor> {
        workspace.android_template_status = summary.status;
        Ok(self.registry.upsert(workspace)?.descriptor)
    }

    /// Check the Android scaffold of a registered workspace.
    pub async fn check_android_scaffold(&self, id: &str) -> Result<ScaffoldActionResult> {
        let workspace = self.registry.require(id)?;
        let summary = self.generator().check(&workspace).await?;
        let project = self.refresh_status(workspace, &summary)?;
        Ok(ScaffoldActionResult {
            summary,
            written: None,
            project,
        })
    }

    /// Generate the Android scaffold into a registered workspace.
    pub async fn generate_android_scaffold(&self, id: &str) -> Result<ScaffoldActionResult> {
        let workspace = self.registry.require(id)?;
        let outcome = self.generator().generate(&workspace).await?;
        let project = self.refresh_status(workspace, &outcome.summary)?;
        Ok(ScaffoldActionResult {
            summary: outcome.summary,
            written: Some(outcome.written),
            project,
        })
    }

    /// Contents of the shared `AGENTS.md`.
    pub async fn load_agents(&self) -> Result<String> {
        templates::load_agents(&self.catalog).await
    }

    /// Replace the shared `AGENTS.md`.
    pub async fn save_agents(&self, content: &str) -> Result<()> {
        templates::save_agents(&self.catalog, content).await
    }
}
