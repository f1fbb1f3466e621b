//! Application module discovery.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::build_file::{path_exists, read_build_files};

/// Directories never considered as modules.
pub const IGNORED_DIRS: &[&str] = &[
    ".git",
    ".idea",
    ".gradle",
    "build",
    "node_modules",
    "out",
    "dist",
];

/// Signatures of the Android application plugin.
static APP_PLUGIN_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r#"(?i)id\s*\(?["']com\.android\.application["']\)?"#,
        r#"(?i)apply\s+plugin:\s*["']com\.android\.application["']"#,
        r#"(?is)plugins\s*\{[^}]*alias\s*\(\s*libs\.plugins\.android\.application\s*\)[^}]*\}"#,
    ]
    .map(|p| Regex::new(p).expect("plugin pattern must compile"))
});

/// Finds candidate application-module directories within a workspace root.
pub struct ModuleLocator;

impl ModuleLocator {
    /// Whether build-file text applies the Android application plugin.
    pub fn has_app_plugin(text: &str) -> bool {
        APP_PLUGIN_PATTERNS.iter().any(|re| re.is_match(text))
    }

    /// Whether a directory's build files declare an application module.
    pub async fn looks_like_app_module(dir: &Path) -> bool {
        let build = read_build_files(dir).await;
        Self::has_app_plugin(&build.text)
    }

    /// Candidate module directories in search order, without duplicates.
    ///
    /// 1. `<root>/app`
    /// 2. `<root>/android/app`
    /// 3. Immediate subdirectories (sorted by name) that apply the
    ///    application plugin, skipping [`IGNORED_DIRS`]
    pub async fn candidates(root: &Path) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        let app_dir = root.join("app");
        if path_exists(&app_dir).await {
            candidates.push(app_dir);
        }

        let cross_platform_app = root.join("android").join("app");
        if path_exists(&cross_platform_app).await {
            candidates.push(cross_platform_app);
        }

        for dir in Self::subdirectories(root).await {
            if Self::looks_like_app_module(&dir).await && !candidates.contains(&dir) {
                candidates.push(dir);
            }
        }

        tracing::debug!(
            "Module candidates for {}: {:?}",
            root.display(),
            candidates
        );
        candidates
    }

    async fn subdirectories(root: &Path) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        let Ok(mut entries) = tokio::fs::read_dir(root).await else {
            return dirs;
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            let name = entry.file_name();
            let ignored = IGNORED_DIRS.iter().any(|d| name.to_str() == Some(*d));
            if is_dir && !ignored {
                dirs.push(entry.path());
            }
        }

        dirs.sort();
        dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn plugin_block_id() {
        assert!(ModuleLocator::has_app_plugin(
            "plugins {\n    id(\"com.android.application\")\n}"
        ));
        assert!(ModuleLocator::has_app_plugin(
            "plugins {\n    id 'com.android.application'\n}"
        ));
    }

    #[test]
    fn apply_plugin_form() {
        assert!(ModuleLocator::has_app_plugin(
            "apply plugin: 'com.android.application'"
        ));
    }

    #[test]
    fn version_catalog_alias_form() {
        let text = "plugins {\n    alias(libs.plugins.android.application)\n    alias(libs.plugins.kotlin.android)\n}";
        assert!(ModuleLocator::has_app_plugin(text));
    }

    #[test]
    fn library_plugin_is_not_application() {
        assert!(!ModuleLocator::has_app_plugin(
            "plugins { id(\"com.android.library\") }"
        ));
        assert!(!ModuleLocator::has_app_plugin(
            "plugins { alias(libs.plugins.android.library) }"
        ));
    }

    #[tokio::test]
    async fn app_then_android_app_priority() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("app")).unwrap();
        fs::create_dir_all(temp.path().join("android").join("app")).unwrap();

        let candidates = ModuleLocator::candidates(temp.path()).await;

        assert_eq!(
            candidates,
            vec![
                temp.path().join("app"),
                temp.path().join("android").join("app"),
            ]
        );
    }

    #[tokio::test]
    async fn scans_subdirectories_for_plugin() {
        let temp = TempDir::new().unwrap();
        let mobile = temp.path().join("mobile");
        fs::create_dir_all(&mobile).unwrap();
        fs::write(
            mobile.join("build.gradle.kts"),
            "plugins { id(\"com.android.application\") }",
        )
        .unwrap();
        let lib = temp.path().join("core");
        fs::create_dir_all(&lib).unwrap();
        fs::write(lib.join("build.gradle"), "apply plugin: 'com.android.library'").unwrap();

        let candidates = ModuleLocator::candidates(temp.path()).await;

        assert_eq!(candidates, vec![mobile]);
    }

    #[tokio::test]
    async fn ignored_directories_are_skipped() {
        let temp = TempDir::new().unwrap();
        let build = temp.path().join("build");
        fs::create_dir_all(&build).unwrap();
        fs::write(build.join("build.gradle"), "apply plugin: 'com.android.application'").unwrap();

        let candidates = ModuleLocator::candidates(temp.path()).await;

        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn app_with_plugin_is_not_duplicated() {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("app");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join("build.gradle"), "apply plugin: 'com.android.application'").unwrap();

        let candidates = ModuleLocator::candidates(temp.path()).await;

        assert_eq!(candidates, vec![app]);
    }

    #[tokio::test]
    async fn missing_root_yields_nothing() {
        let candidates = ModuleLocator::candidates(Path::new("/nonexistent/droidsync/root")).await;
        assert!(candidates.is_empty());
    }
}
