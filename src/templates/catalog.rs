//! Template asset discovery.
//!
//! The template root is resolved once from a list of candidate install
//! locations, then enumerated once. Both results are memoized for the life
//! of the catalog; a process keeps a single catalog, so new assets need a
//! restart (or [`TemplateCatalog::invalidate`] in tests).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;
use walkdir::WalkDir;

use crate::error::{DroidsyncError, Result};

/// Subtree holding Android-specific scaffold templates.
pub const ANDROID_SUBTREE: &str = "android";

/// Extension marking a file as a substitution template.
pub const TEMPLATE_EXTENSION: &str = ".hbs";

/// Path segment replaced by the package's directory path.
pub const PACKAGE_PLACEHOLDER: &str = "__package__";

/// Path segment mapped onto the workspace's module directory.
pub const MODULE_SEGMENT: &str = "app";

/// Environment variable naming an explicit template root.
pub const TEMPLATES_DIR_ENV: &str = "DROIDSYNC_TEMPLATES_DIR";

/// Target-path strategy for an Android template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateMode {
    /// Relative to the workspace root.
    Root,
    /// Relative to the module directory.
    Module,
    /// Under `src/main/java/<package path>` of the module directory.
    Package,
}

impl TemplateMode {
    /// Mode implied by the first segment of a descriptor path.
    pub fn from_first_segment(segment: &str) -> Self {
        match segment {
            PACKAGE_PLACEHOLDER => Self::Package,
            MODULE_SEGMENT => Self::Module,
            _ => Self::Root,
        }
    }
}

/// An Android scaffold template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    /// Absolute path of the template file.
    pub source_path: PathBuf,
    /// Path relative to the Android subtree, `/`-separated.
    pub relative_path: String,
    /// `relative_path` split on `/`.
    pub segments: Vec<String>,
    pub mode: TemplateMode,
}

impl TemplateDescriptor {
    /// Build a descriptor from a catalog path, if it is an Android template.
    pub fn from_catalog_path(root: &Path, catalog_path: &str) -> Option<Self> {
        let relative = catalog_path.strip_prefix(ANDROID_SUBTREE)?.strip_prefix('/')?;
        if !relative.ends_with(TEMPLATE_EXTENSION) {
            return None;
        }
        let segments: Vec<String> = relative.split('/').map(String::from).collect();
        let mode = TemplateMode::from_first_segment(segments.first()?);

        Some(Self {
            source_path: join_relative(root, catalog_path),
            relative_path: relative.to_string(),
            segments,
            mode,
        })
    }
}

/// Whether a catalog path belongs to the Android subtree.
pub fn is_android_path(catalog_path: &str) -> bool {
    catalog_path.split('/').next() == Some(ANDROID_SUBTREE)
}

/// Join a `/`-separated relative path onto a base directory.
pub fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(base.to_path_buf(), |acc, seg| acc.join(seg))
}

/// The set of template assets available to a process.
#[derive(Debug, Default)]
pub struct TemplateCatalog {
    candidates: Vec<PathBuf>,
    root: OnceCell<PathBuf>,
    paths: OnceCell<Arc<Vec<String>>>,
}

impl TemplateCatalog {
    /// Create a catalog that searches `candidates` in order.
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            root: OnceCell::new(),
            paths: OnceCell::new(),
        }
    }

    /// Create a catalog rooted at a known directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(vec![root.into()])
    }

    /// Default install locations, most specific first.
    ///
    /// 1. `configured` (from the config file)
    /// 2. `$DROIDSYNC_TEMPLATES_DIR`
    /// 3. `<exe dir>/templates`, `<exe dir>/../share/droidsync/templates`
    /// 4. `<cwd>/templates`, `<cwd>/assets/templates`
    /// 5. `<home>/templates`
    pub fn default_candidates(configured: Option<&Path>, home: &Path) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Some(dir) = configured {
            candidates.push(dir.to_path_buf());
        }

        if let Some(dir) = std::env::var_os(TEMPLATES_DIR_ENV) {
            candidates.push(PathBuf::from(dir));
        }

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join("templates"));
            candidates.push(exe_dir.join("..").join("share").join("droidsync").join("templates"));
        }

        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join("templates"));
            candidates.push(cwd.join("assets").join("templates"));
        }

        candidates.push(home.join("templates"));

        let mut unique = Vec::new();
        for c in candidates {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        unique
    }

    /// Locations searched for the template root.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Resolved template root (first existing candidate).
    pub async fn root(&self) -> Result<&Path> {
        let root = self
            .root
            .get_or_try_init(|| resolve_root(&self.candidates))
            .await?;
        Ok(root.as_path())
    }

    /// Every template file, root-relative with `/` separators, sorted.
    pub async fn all_paths(&self) -> Result<Arc<Vec<String>>> {
        let root = self.root().await?.to_path_buf();
        let paths = self
            .paths
            .get_or_try_init(|| async move {
                let listed = tokio::task::spawn_blocking(move || collect_files(&root))
                    .await
                    .map_err(|e| anyhow::anyhow!("template enumeration panicked: {}", e))?;
                tracing::debug!("Template catalog holds {} files", listed.len());
                Ok::<_, DroidsyncError>(Arc::new(listed))
            })
            .await?;
        Ok(Arc::clone(paths))
    }

    /// Template paths outside the Android subtree.
    pub async fn general_paths(&self) -> Result<Vec<String>> {
        let all = self.all_paths().await?;
        Ok(all.iter().filter(|p| !is_android_path(p)).cloned().collect())
    }

    /// Android scaffold templates, sorted by relative path.
    pub async fn android_descriptors(&self) -> Result<Vec<TemplateDescriptor>> {
        let root = self.root().await?.to_path_buf();
        let all = self.all_paths().await?;
        let mut descriptors: Vec<TemplateDescriptor> = all
            .iter()
            .filter_map(|p| TemplateDescriptor::from_catalog_path(&root, p))
            .collect();
        descriptors.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(descriptors)
    }

    /// Absolute source path for a catalog-relative path.
    pub async fn source_path(&self, relative: &str) -> Result<PathBuf> {
        Ok(join_relative(self.root().await?, relative))
    }

    /// Forget the resolved root and path list.
    pub fn invalidate(&mut self) {
        self.root.take();
        self.paths.take();
    }
}

async fn resolve_root(candidates: &[PathBuf]) -> Result<PathBuf> {
    for candidate in candidates {
        let is_dir = tokio::fs::metadata(candidate)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if is_dir {
            tracing::debug!("Using template root {}", candidate.display());
            return Ok(candidate.clone());
        }
    }

    Err(DroidsyncError::TemplateRootNotFound {
        searched: candidates
            .iter()
            .map(|c| c.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn collect_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let rel = entry.path().strip_prefix(root).ok()?;
            let parts: Vec<String> = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect();
            Some(parts.join("/"))
        })
        .collect();
    files.sort();
    files
}
