//! Workspace resolution: module discovery plus package detection.

use std::path::Path;

use super::descriptor::WorkspaceDescriptor;
use crate::detection::{read_build_files, ModuleLocator, PackageDetector};

/// Builds a [`WorkspaceDescriptor`] for a workspace root.
pub struct WorkspaceResolver;

impl WorkspaceResolver {
    /// Resolve a workspace root.
    ///
    /// Candidate modules are tried in [`ModuleLocator`] order and the first
    /// one yielding a package wins. When none does, the root's own build
    /// files are checked for `applicationId`/`namespace` and a warning is
    /// attached. Finding nothing is not an error.
    pub async fn resolve(root_dir: &Path) -> WorkspaceDescriptor {
        let mut descriptor = WorkspaceDescriptor::new(root_dir);
        let root = descriptor.root_dir.clone();
        let mut files_checked = Vec::new();

        for module in ModuleLocator::candidates(&root).await {
            let detection = PackageDetector::detect(&module, &mut files_checked).await;
            if detection.is_found() {
                descriptor.module_dir = Some(module);
                descriptor.files_checked = files_checked;
                return descriptor.with_package(detection.package_name, detection.source);
            }
        }

        let build = read_build_files(&root).await;
        files_checked.extend(build.files.iter().cloned());
        descriptor.files_checked = files_checked;

        let detection = PackageDetector::detect_in_build_text(&build.text);
        if detection.is_found() {
            tracing::debug!(
                "Package found in root build file of {} ({})",
                root.display(),
                detection.source
            );
            descriptor.warnings.push(format!(
                "{} found in root build file; verify module structure.",
                detection.source
            ));
            return descriptor.with_package(detection.package_name, detection.source);
        }

        tracing::debug!("No package detected under {}", root.display());
        descriptor
    }
}
