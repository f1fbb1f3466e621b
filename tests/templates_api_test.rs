//! Integration tests for the template catalog, sync engine, and scaffold.

use droidsync::state::{MemoryStore, WorkspaceRegistry};
use droidsync::templates::{SyncMode, SyncRequest, SyncState, TemplateCatalog, TemplateSyncEngine};
use droidsync::workspace::AndroidTemplateStatus;
use droidsync::{DroidsyncError, WorkspaceService};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn template_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "AGENTS.md", "# Agents\n");
    write(temp.path(), ".editorconfig", "root = true\n");
    write(temp.path(), "docs/STYLE.md", "style\n");
    write(
        temp.path(),
        "android/__package__/MainActivity.kt.hbs",
        "package {{base_package}}\n\nclass {{last_package_word_capitalized}}Activity\n",
    );
    write(
        temp.path(),
        "android/app/proguard-rules.pro.hbs",
        "# {{project_name}}\n",
    );
    write(
        temp.path(),
        "android/settings.gradle.kts.hbs",
        "rootProject.name = \"{{project_name}}\"\n",
    );
    temp
}

fn service(templates: &Path) -> WorkspaceService {
    let registry = WorkspaceRegistry::open(Arc::new(MemoryStore::new())).unwrap();
    WorkspaceService::new(TemplateCatalog::with_root(templates), registry)
}

#[test]
fn missing_sync_skips_existing_files() {
    let templates = template_root();
    let project = TempDir::new().unwrap();
    write(project.path(), "AGENTS.md", "local edits\n");
    let catalog = TemplateCatalog::with_root(templates.path());
    let engine = TemplateSyncEngine::new(&catalog);
    let rt = runtime();

    let mut events = Vec::new();
    let request = SyncRequest::new(project.path(), SyncMode::Missing);
    let result = rt
        .block_on(engine.sync(&request, |e| events.push(e)))
        .unwrap();

    assert_eq!(
        fs::read_to_string(project.path().join("AGENTS.md")).unwrap(),
        "local edits\n"
    );
    assert!(project.path().join("docs/STYLE.md").exists());
    assert!(!project.path().join("android").exists());
    assert!(result.status.values().all(|present| *present));

    let complete = events.last().unwrap();
    assert_eq!(complete.state, SyncState::Complete);
    assert_eq!(complete.copied_count, Some(2));
    assert_eq!(complete.total_count, Some(2));
    assert!(events.iter().all(|e| e.run_id == result.run_id));
}

#[test]
fn all_sync_overwrites() {
    let templates = template_root();
    let project = TempDir::new().unwrap();
    write(project.path(), "AGENTS.md", "local edits\n");
    let catalog = TemplateCatalog::with_root(templates.path());
    let rt = runtime();

    let request = SyncRequest::new(project.path(), SyncMode::All);
    rt.block_on(TemplateSyncEngine::new(&catalog).sync(&request, |_| {}))
        .unwrap();

    assert_eq!(
        fs::read_to_string(project.path().join("AGENTS.md")).unwrap(),
        "# Agents\n"
    );
}

#[test]
fn single_sync_with_unknown_files_is_invalid() {
    let templates = template_root();
    let project = TempDir::new().unwrap();
    let catalog = TemplateCatalog::with_root(templates.path());
    let rt = runtime();

    let request = SyncRequest::single(project.path(), vec!["nope.txt".into()]);
    let err = rt
        .block_on(TemplateSyncEngine::new(&catalog).sync(&request, |_| {}))
        .unwrap_err();

    assert!(matches!(err, DroidsyncError::InvalidRequest { .. }));
}

#[test]
fn missing_template_root_is_reported() {
    let temp = TempDir::new().unwrap();
    let catalog = TemplateCatalog::with_root(temp.path().join("absent"));
    let rt = runtime();

    let err = rt
        .block_on(TemplateSyncEngine::new(&catalog).check(temp.path()))
        .unwrap_err();

    assert!(matches!(err, DroidsyncError::TemplateRootNotFound { .. }));
}

#[test]
fn scaffold_generates_package_aware_tree() {
    let templates = template_root();
    let project = TempDir::new().unwrap();
    write(
        project.path(),
        "app/build.gradle.kts",
        "android { defaultConfig { applicationId = \"com.acme.store\" } }",
    );
    let service = service(templates.path());
    let rt = runtime();

    let workspace = rt.block_on(service.add_workspace(project.path())).unwrap();
    let root = &workspace.root_dir;

    let checked = rt
        .block_on(service.check_android_scaffold(&workspace.id))
        .unwrap();
    assert_eq!(checked.summary.status, AndroidTemplateStatus::NotStarted);
    assert_eq!(checked.summary.total, 3);

    let generated = rt
        .block_on(service.generate_android_scaffold(&workspace.id))
        .unwrap();
    assert_eq!(generated.written, Some(3));
    assert_eq!(generated.summary.status, AndroidTemplateStatus::Ready);
    assert_eq!(
        generated.project.android_template_status,
        AndroidTemplateStatus::Ready
    );

    let activity =
        fs::read_to_string(root.join("app/src/main/java/com/acme/store/MainActivity.kt")).unwrap();
    assert!(activity.contains("package com.acme.store"));
    assert!(activity.contains("class StoreActivity"));
    assert!(root.join("app/proguard-rules.pro").exists());
    assert_eq!(
        fs::read_to_string(root.join("settings.gradle.kts")).unwrap(),
        format!("rootProject.name = \"{}\"\n", workspace.name)
    );
}

#[test]
fn scaffold_requires_package() {
    let templates = template_root();
    let project = TempDir::new().unwrap();
    let service = service(templates.path());
    let rt = runtime();

    let workspace = rt.block_on(service.add_workspace(project.path())).unwrap();
    let err = rt
        .block_on(service.generate_android_scaffold(&workspace.id))
        .unwrap_err();

    assert!(matches!(err, DroidsyncError::InvalidInput { .. }));
    assert!(!project.path().join("settings.gradle.kts").exists());
}
