//! General template synchronization.
//!
//! A sync run selects template paths according to its [`SyncMode`], then
//! copies them one at a time into the workspace. Each path gets a `start`
//! event followed by exactly one of `success`, `skipped`, or `error`; a
//! single `complete` event closes the run. Files are processed sequentially
//! so events for one run arrive in selection order, and a failed file never
//! stops the rest of the run.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::{join_relative, TemplateCatalog};
use crate::detection::build_file::path_exists;
use crate::error::{DroidsyncError, Result};

/// Presence of each general template in a workspace.
pub type TemplateStatusMap = BTreeMap<String, bool>;

/// Which templates a sync run copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Templates whose target does not exist yet; never overwrites.
    Missing,
    /// Every template; overwrites.
    All,
    /// An explicit file list; overwrites.
    Single,
}

impl SyncMode {
    /// Whether existing targets are replaced.
    pub fn overwrites(&self) -> bool {
        !matches!(self, Self::Missing)
    }

    /// Wire name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::All => "all",
            Self::Single => "single",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncMode {
    type Err = DroidsyncError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "missing" => Ok(Self::Missing),
            "all" => Ok(Self::All),
            "single" => Ok(Self::Single),
            _ => Err(DroidsyncError::UnsupportedSyncMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// A request to synchronize templates into a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub project_dir: PathBuf,
    pub mode: SyncMode,
    /// Relative paths for [`SyncMode::Single`]; ignored otherwise.
    #[serde(default)]
    pub files: Vec<String>,
}

impl SyncRequest {
    /// Request a `missing` or `all` run.
    pub fn new(project_dir: impl Into<PathBuf>, mode: SyncMode) -> Self {
        Self {
            project_dir: project_dir.into(),
            mode,
            files: Vec::new(),
        }
    }

    /// Request a `single` run over explicit files.
    pub fn single(project_dir: impl Into<PathBuf>, files: Vec<String>) -> Self {
        Self {
            project_dir: project_dir.into(),
            mode: SyncMode::Single,
            files,
        }
    }
}

/// Lifecycle state carried by a progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncState {
    Start,
    Success,
    Skipped,
    Error,
    Complete,
}

/// One progress event of a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncProgress {
    pub project_dir: PathBuf,
    pub run_id: Uuid,
    pub mode: SyncMode,
    /// `None` only on the `complete` event.
    pub relative_path: Option<String>,
    pub state: SyncState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copied_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
}

/// Outcome of a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub run_id: Uuid,
    /// Presence map recomputed after the run.
    pub status: TemplateStatusMap,
}

/// Terminal state of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FileOutcome {
    Copied,
    Skipped,
    Failed(String),
}

/// Emits progress events for a single run.
struct RunEmitter<'a, F> {
    project_dir: &'a Path,
    run_id: Uuid,
    mode: SyncMode,
    sink: F,
}

impl<F: FnMut(SyncProgress)> RunEmitter<'_, F> {
    fn event(&self, relative_path: Option<&str>, state: SyncState) -> SyncProgress {
        SyncProgress {
            project_dir: self.project_dir.to_path_buf(),
            run_id: self.run_id,
            mode: self.mode,
            relative_path: relative_path.map(String::from),
            state,
            error: None,
            copied_count: None,
            total_count: None,
        }
    }

    fn start(&mut self, path: &str) {
        let event = self.event(Some(path), SyncState::Start);
        (self.sink)(event);
    }

    fn finish(&mut self, path: &str, outcome: &FileOutcome) {
        let mut event = match outcome {
            FileOutcome::Copied => self.event(Some(path), SyncState::Success),
            FileOutcome::Skipped => self.event(Some(path), SyncState::Skipped),
            FileOutcome::Failed(_) => self.event(Some(path), SyncState::Error),
        };
        if let FileOutcome::Failed(message) = outcome {
            event.error = Some(message.clone());
        }
        (self.sink)(event);
    }

    fn complete(&mut self, copied: usize, total: usize) {
        let mut event = self.event(None, SyncState::Complete);
        event.copied_count = Some(copied);
        event.total_count = Some(total);
        (self.sink)(event);
    }
}

/// Normalize a caller-supplied relative path; `None` if unusable.
pub fn normalize_request_path(raw: &str) -> Option<String> {
    let unified = raw.trim().replace('\\', "/");
    let segments: Vec<&str> = unified
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    if segments.is_empty() || segments.contains(&"..") {
        return None;
    }
    Some(segments.join("/"))
}

/// Copies general templates into workspaces.
pub struct TemplateSyncEngine<'a> {
    catalog: &'a TemplateCatalog,
}

impl<'a> TemplateSyncEngine<'a> {
    /// Create an engine over a catalog.
    pub fn new(catalog: &'a TemplateCatalog) -> Self {
        Self { catalog }
    }

    /// Presence of every general template in `project_dir`.
    pub async fn check(&self, project_dir: &Path) -> Result<TemplateStatusMap> {
        let mut status = TemplateStatusMap::new();
        for rel in self.catalog.general_paths().await? {
            let exists = path_exists(&join_relative(project_dir, &rel)).await;
            status.insert(rel, exists);
        }
        Ok(status)
    }

    /// Paths a request selects, in processing order.
    pub async fn select(&self, request: &SyncRequest) -> Result<Vec<String>> {
        let general = self.catalog.general_paths().await?;

        match request.mode {
            SyncMode::All => Ok(general),
            SyncMode::Missing => {
                let mut selected = Vec::new();
                for rel in general {
                    if !path_exists(&join_relative(&request.project_dir, &rel)).await {
                        selected.push(rel);
                    }
                }
                Ok(selected)
            }
            SyncMode::Single => {
                let mut requested: Vec<String> = Vec::new();
                for raw in &request.files {
                    if let Some(path) = normalize_request_path(raw) {
                        if !requested.contains(&path) {
                            requested.push(path);
                        }
                    }
                }

                let known: HashSet<&String> = general.iter().collect();
                if !requested.iter().any(|p| known.contains(p)) {
                    return Err(DroidsyncError::InvalidRequest {
                        message: "no requested file matches a known template".to_string(),
                    });
                }

                let wanted: HashSet<&String> = requested.iter().collect();
                let mut selected: Vec<String> = general
                    .iter()
                    .filter(|p| wanted.contains(p))
                    .cloned()
                    .collect();
                selected.extend(requested.iter().filter(|p| !known.contains(p)).cloned());
                Ok(selected)
            }
        }
    }

    /// Run a sync, reporting each step to `on_progress`.
    pub async fn sync<F>(&self, request: &SyncRequest, on_progress: F) -> Result<SyncResult>
    where
        F: FnMut(SyncProgress),
    {
        let selected = self.select(request).await?;
        let root = self.catalog.root().await?.to_path_buf();
        let general: HashSet<String> = self.catalog.general_paths().await?.into_iter().collect();

        let mut emitter = RunEmitter {
            project_dir: &request.project_dir,
            run_id: Uuid::new_v4(),
            mode: request.mode,
            sink: on_progress,
        };

        tracing::debug!(
            "Sync run {} ({}) selected {} files for {}",
            emitter.run_id,
            request.mode,
            selected.len(),
            request.project_dir.display()
        );

        let mut copied = 0;
        for rel in &selected {
            emitter.start(rel);
            let outcome = if general.contains(rel) {
                copy_template(&root, &request.project_dir, rel, request.mode).await
            } else {
                FileOutcome::Failed(format!("Template source missing: {}", rel))
            };
            if outcome == FileOutcome::Copied {
                copied += 1;
            }
            if let FileOutcome::Failed(message) = &outcome {
                tracing::warn!("Failed to sync {}: {}", rel, message);
            }
            emitter.finish(rel, &outcome);
        }

        let status = self.check(&request.project_dir).await?;
        emitter.complete(copied, selected.len());

        tracing::info!(
            "Sync run {} copied {} of {} templates",
            emitter.run_id,
            copied,
            selected.len()
        );

        Ok(SyncResult {
            run_id: emitter.run_id,
            status,
        })
    }
}

async fn copy_template(root: &Path, project_dir: &Path, rel: &str, mode: SyncMode) -> FileOutcome {
    let target = join_relative(project_dir, rel);
    if !mode.overwrites() && path_exists(&target).await {
        return FileOutcome::Skipped;
    }

    let source = join_relative(root, rel);
    let is_file = tokio::fs::metadata(&source)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if !is_file {
        return FileOutcome::Failed(format!("Template source missing: {}", rel));
    }

    if let Some(parent) = target.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            return FileOutcome::Failed(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ));
        }
    }

    match tokio::fs::copy(&source, &target).await {
        Ok(_) => FileOutcome::Copied,
        Err(e) => FileOutcome::Failed(format!("Failed to copy {}: {}", rel, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = join_relative(root, rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> (TempDir, TempDir, TemplateCatalog) {
        let templates = TempDir::new().unwrap();
        write(templates.path(), "AGENTS.md", "agents");
        write(templates.path(), ".editorconfig", "root = true");
        write(templates.path(), "docs/STYLE.md", "style");
        write(templates.path(), "android/gradle.properties.hbs", "x");
        let workspace = TempDir::new().unwrap();
        let catalog = TemplateCatalog::with_root(templates.path());
        (templates, workspace, catalog)
    }

    async fn run(
        engine: &TemplateSyncEngine<'_>,
        request: &SyncRequest,
    ) -> (SyncResult, Vec<SyncProgress>) {
        let mut events = Vec::new();
        let result = engine.sync(request, |e| events.push(e)).await.unwrap();
        (result, events)
    }

    fn complete_counts(events: &[SyncProgress]) -> (usize, usize) {
        let complete: Vec<_> = events
            .iter()
            .filter(|e| e.state == SyncState::Complete)
            .collect();
        assert_eq!(complete.len(), 1);
        (
            complete[0].copied_count.unwrap(),
            complete[0].total_count.unwrap(),
        )
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("missing".parse::<SyncMode>().unwrap(), SyncMode::Missing);
        assert_eq!("ALL".parse::<SyncMode>().unwrap(), SyncMode::All);
        assert_eq!(" single ".parse::<SyncMode>().unwrap(), SyncMode::Single);
        assert!(matches!(
            "some".parse::<SyncMode>(),
            Err(DroidsyncError::UnsupportedSyncMode { .. })
        ));
    }

    #[test]
    fn request_path_normalization() {
        assert_eq!(
            normalize_request_path(" docs\\STYLE.md "),
            Some("docs/STYLE.md".to_string())
        );
        assert_eq!(
            normalize_request_path("./AGENTS.md"),
            Some("AGENTS.md".to_string())
        );
        assert_eq!(normalize_request_path("/AGENTS.md"), Some("AGENTS.md".to_string()));
        assert_eq!(normalize_request_path("../etc/passwd"), None);
        assert_eq!(normalize_request_path("   "), None);
    }

    #[tokio::test]
    async fn check_reports_presence_of_general_templates() {
        let (_t, ws, catalog) = fixture();
        write(ws.path(), "AGENTS.md", "existing");
        let engine = TemplateSyncEngine::new(&catalog);

        let status = engine.check(ws.path()).await.unwrap();

        assert_eq!(status.len(), 3);
        assert!(status["AGENTS.md"]);
        assert!(!status[".editorconfig"]);
        assert!(!status.contains_key("android/gradle.properties.hbs"));
    }

    #[tokio::test]
    async fn missing_mode_is_idempotent() {
        let (_t, ws, catalog) = fixture();
        let engine = TemplateSyncEngine::new(&catalog);
        let request = SyncRequest::new(ws.path(), SyncMode::Missing);

        let (first, events) = run(&engine, &request).await;
        assert_eq!(complete_counts(&events), (3, 3));
        assert!(first.status.values().all(|present| *present));

        let (_, events) = run(&engine, &request).await;
        assert_eq!(events.len(), 1);
        assert_eq!(complete_counts(&events), (0, 0));
    }

    #[tokio::test]
    async fn missing_mode_never_overwrites() {
        let (_t, ws, catalog) = fixture();
        write(ws.path(), "AGENTS.md", "mine");
        let engine = TemplateSyncEngine::new(&catalog);

        let (_, events) = run(&engine, &SyncRequest::new(ws.path(), SyncMode::Missing)).await;

        assert_eq!(complete_counts(&events), (2, 2));
        assert_eq!(fs::read_to_string(ws.path().join("AGENTS.md")).unwrap(), "mine");
    }

    #[tokio::test]
    async fn all_mode_overwrites_everything() {
        let (_t, ws, catalog) = fixture();
        write(ws.path(), "AGENTS.md", "mine");
        let engine = TemplateSyncEngine::new(&catalog);

        let (_, events) = run(&engine, &SyncRequest::new(ws.path(), SyncMode::All)).await;

        assert_eq!(complete_counts(&events), (3, 3));
        assert_eq!(fs::read_to_string(ws.path().join("AGENTS.md")).unwrap(), "agents");
        assert_eq!(fs::read_to_string(ws.path().join("docs/STYLE.md")).unwrap(), "style");
    }

    #[tokio::test]
    async fn events_follow_catalog_order() {
        let (_t, ws, catalog) = fixture();
        let engine = TemplateSyncEngine::new(&catalog);

        let (result, events) = run(&engine, &SyncRequest::new(ws.path(), SyncMode::All)).await;

        let sequence: Vec<(Option<&str>, SyncState)> = events
            .iter()
            .map(|e| (e.relative_path.as_deref(), e.state))
            .collect();
        assert_eq!(
            sequence,
            vec![
                (Some(".editorconfig"), SyncState::Start),
                (Some(".editorconfig"), SyncState::Success),
                (Some("AGENTS.md"), SyncState::Start),
                (Some("AGENTS.md"), SyncState::Success),
                (Some("docs/STYLE.md"), SyncState::Start),
                (Some("docs/STYLE.md"), SyncState::Success),
                (None, SyncState::Complete),
            ]
        );
        assert!(events.iter().all(|e| e.run_id == result.run_id));
    }

    #[tokio::test]
    async fn single_mode_isolates_missing_source() {
        let (_t, ws, catalog) = fixture();
        let engine = TemplateSyncEngine::new(&catalog);
        let request = SyncRequest::single(
            ws.path(),
            vec![
                "docs/STYLE.md".to_string(),
                "NOPE.md".to_string(),
                "AGENTS.md".to_string(),
            ],
        );

        let (_, events) = run(&engine, &request).await;

        let terminal: Vec<(&str, SyncState)> = events
            .iter()
            .filter(|e| !matches!(e.state, SyncState::Start | SyncState::Complete))
            .map(|e| (e.relative_path.as_deref().unwrap(), e.state))
            .collect();
        assert_eq!(
            terminal,
            vec![
                ("AGENTS.md", SyncState::Success),
                ("docs/STYLE.md", SyncState::Success),
                ("NOPE.md", SyncState::Error),
            ]
        );
        let error = events.iter().find(|e| e.state == SyncState::Error).unwrap();
        assert!(error.error.as_deref().unwrap().contains("NOPE.md"));
        assert_eq!(complete_counts(&events), (2, 3));
    }

    #[tokio::test]
    async fn single_mode_refuses_android_templates() {
        let (_t, ws, catalog) = fixture();
        let engine = TemplateSyncEngine::new(&catalog);
        let request = SyncRequest::single(
            ws.path(),
            vec![
                "AGENTS.md".to_string(),
                "android/gradle.properties.hbs".to_string(),
            ],
        );

        let (result, events) = run(&engine, &request).await;

        assert!(events.iter().any(|e| {
            e.relative_path.as_deref() == Some("android/gradle.properties.hbs")
                && e.state == SyncState::Error
                && e.error.as_deref().unwrap_or_default().contains("Template source missing")
        }));
        assert_eq!(complete_counts(&events), (1, 2));
        assert!(!ws.path().join("android").exists());
        assert!(!result.status.contains_key("android/gradle.properties.hbs"));
    }

    #[tokio::test]
    async fn io_failure_does_not_stop_the_run() {
        let (_t, ws, catalog) = fixture();
        write(ws.path(), "docs", "a file where a directory belongs");
        let engine = TemplateSyncEngine::new(&catalog);

        let (_, events) = run(&engine, &SyncRequest::new(ws.path(), SyncMode::All)).await;

        let terminal: Vec<(&str, SyncState)> = events
            .iter()
            .filter(|e| !matches!(e.state, SyncState::Start | SyncState::Complete))
            .map(|e| (e.relative_path.as_deref().unwrap(), e.state))
            .collect();
        assert_eq!(
            terminal,
            vec![
                (".editorconfig", SyncState::Success),
                ("AGENTS.md", SyncState::Success),
                ("docs/STYLE.md", SyncState::Error),
            ]
        );
        let error = events.iter().find(|e| e.state == SyncState::Error).unwrap();
        assert!(!error.error.as_deref().unwrap().is_empty());
        assert_eq!(complete_counts(&events), (2, 3));
        assert_eq!(fs::read_to_string(ws.path().join("AGENTS.md")).unwrap(), "agents");
    }

    #[tokio::test]
    async fn single_mode_deduplicates() {
        let (_t, ws, catalog) = fixture();
        let engine = TemplateSyncEngine::new(&catalog);
        let request = SyncRequest::single(
            ws.path(),
            vec!["AGENTS.md".to_string(), "./AGENTS.md".to_string()],
        );

        let (_, events) = run(&engine, &request).await;

        assert_eq!(complete_counts(&events), (1, 1));
    }

    #[tokio::test]
    async fn single_mode_rejects_unknown_only() {
        let (_t, ws, catalog) = fixture();
        let engine = TemplateSyncEngine::new(&catalog);
        let request = SyncRequest::single(ws.path(), vec!["NOPE.md".to_string()]);

        let err = engine.sync(&request, |_| {}).await.unwrap_err();

        assert!(matches!(err, DroidsyncError::InvalidRequest { .. }));
    }

    #[tokio::test]
    async fn single_mode_rejects_empty_list() {
        let (_t, ws, catalog) = fixture();
        let engine = TemplateSyncEngine::new(&catalog);

        let err = engine
            .sync(&SyncRequest::single(ws.path(), Vec::new()), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, DroidsyncError::InvalidRequest { .. }));
    }

    #[test]
    fn progress_serializes_camel_case() {
        let event = SyncProgress {
            project_dir: PathBuf::from("/ws"),
            run_id: Uuid::nil(),
            mode: SyncMode::All,
            relative_path: None,
            state: SyncState::Complete,
            error: None,
            copied_count: Some(2),
            total_count: Some(3),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["state"], "complete");
        assert_eq!(json["copiedCount"], 2);
        assert_eq!(json["totalCount"], 3);
        assert!(json.get("error").is_none());
    }
}
