//! Workspace descriptor and its status enums.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::id::{derive_name, normalize_root, workspace_id};

/// Which heuristic supplied a workspace's package name.
///
/// Variant order is heuristic priority: `ApplicationId` beats `Namespace`
/// beats `Manifest`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum PackageSource {
    ApplicationId,
    Namespace,
    Manifest,
    #[default]
    None,
}

impl PackageSource {
    /// Wire name of this source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationId => "applicationId",
            Self::Namespace => "namespace",
            Self::Manifest => "manifest",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for PackageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of the Android scaffold exists in a workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AndroidTemplateStatus {
    #[default]
    NotStarted,
    Incomplete,
    Ready,
}

impl AndroidTemplateStatus {
    /// Classify a scaffold by how many of its targets are present.
    pub fn classify(total: usize, present: usize) -> Self {
        if total == 0 || present == 0 {
            Self::NotStarted
        } else if present == total {
            Self::Ready
        } else {
            Self::Incomplete
        }
    }

    /// Wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "notStarted",
            Self::Incomplete => "incomplete",
            Self::Ready => "ready",
        }
    }
}

impl std::fmt::Display for AndroidTemplateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A known Android workspace.
///
/// Descriptors are snapshots: components pass them by value and only the
/// registry stores them. `package_source` is [`PackageSource::None`] exactly
/// when `package_name` is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDescriptor {
    /// Hash of `root_dir`.
    pub id: String,

    /// Last segment of `root_dir`.
    pub name: String,

    /// Workspace root as scanned.
    pub root_dir: PathBuf,

    /// Module directory the package was detected in.
    #[serde(default)]
    pub module_dir: Option<PathBuf>,

    /// Detected Java/Kotlin package.
    #[serde(default)]
    pub package_name: Option<String>,

    /// Heuristic that produced `package_name`.
    #[serde(default)]
    pub package_source: PackageSource,

    /// Derived from the last scaffold check or generate.
    #[serde(default)]
    pub android_template_status: AndroidTemplateStatus,

    /// Detection warnings worth showing to the user.
    #[serde(default)]
    pub warnings: Vec<String>,

    /// Every file consulted during detection, in consultation order.
    #[serde(default)]
    pub files_checked: Vec<PathBuf>,
}

impl WorkspaceDescriptor {
    /// Create a descriptor for a root with no detected package.
    pub fn new(root_dir: &Path) -> Self {
        let root = normalize_root(root_dir);
        Self {
            id: workspace_id(&root),
            name: derive_name(&root),
            root_dir: root,
            module_dir: None,
            package_name: None,
            package_source: PackageSource::None,
            android_template_status: AndroidTemplateStatus::NotStarted,
            warnings: Vec::new(),
            files_checked: Vec::new(),
        }
    }

    /// Attach a detected package, keeping name and source consistent.
    pub fn with_package(mut self, package: Option<String>, source: PackageSource) -> Self {
        match package.filter(|p| !p.trim().is_empty()) {
            Some(p) if source != PackageSource::None => {
                self.package_name = Some(p);
                self.package_source = source;
            }
            _ => {
                self.package_name = None;
                self.package_source = PackageSource::None;
            }
        }
        self
    }

    /// Package name trimmed and lower-cased; `None` when absent or blank.
    pub fn normalized_package(&self) -> Option<String> {
        normalize_package(self.package_name.as_deref())
    }

    /// The module directory scaffolding targets: the detected one, else `<root>/app`.
    pub fn module_dir_or_default(&self) -> PathBuf {
        self.module_dir
            .clone()
            .unwrap_or_else(|| self.root_dir.join("app"))
    }
}

/// Normalize a package name for identity comparison.
pub fn normalize_package(package: Option<&str>) -> Option<String> {
    let trimmed = package?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
