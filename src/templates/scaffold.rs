//! Android scaffold generation.
//!
//! Android templates live under the catalog's `android/` subtree and carry
//! the `.hbs` marker. Each is mapped onto a target path according to its
//! [`TemplateMode`], rendered with package-derived variables, and written
//! with the marker stripped.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::catalog::{TemplateCatalog, TemplateDescriptor, TemplateMode, TEMPLATE_EXTENSION};
use super::render::{RenderContext, TemplateRenderer};
use crate::detection::build_file::path_exists;
use crate::error::{DroidsyncError, Result};
use crate::workspace::{AndroidTemplateStatus, WorkspaceDescriptor};

/// How much of the scaffold exists in a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldSummary {
    pub status: AndroidTemplateStatus,
    pub total: usize,
    pub present: usize,
    pub missing: usize,
}

impl ScaffoldSummary {
    /// Summarize `present` of `total` targets.
    pub fn new(total: usize, present: usize) -> Self {
        Self {
            status: AndroidTemplateStatus::classify(total, present),
            total,
            present,
            missing: total.saturating_sub(present),
        }
    }
}

/// Result of a generate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaffoldOutcome {
    pub written: usize,
    pub summary: ScaffoldSummary,
}

/// Split a package into directory segments.
///
/// Segments are trimmed and empty ones dropped; a package with no segments
/// left is invalid.
pub fn package_segments(package: &str) -> Result<Vec<String>> {
    let segments: Vec<String> = package
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if segments.is_empty() {
        return Err(DroidsyncError::invalid_input(format!(
            "package name '{}' has no usable segments",
            package
        )));
    }
    Ok(segments)
}

/// Remove the template marker from a file name.
pub fn strip_template_extension(segment: &str) -> &str {
    segment.strip_suffix(TEMPLATE_EXTENSION).unwrap_or(segment)
}

/// Upper-case the first character of a word.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Variables available to scaffold templates.
pub fn substitution_context(package: &str, project_name: &str) -> Result<RenderContext> {
    let segments = package_segments(package)?;
    let last = segments.last().cloned().unwrap_or_default();

    let mut context = RenderContext::new();
    context.insert("base_package".to_string(), segments.join("."));
    context.insert("last_package_word_capitalized".to_string(), capitalize(&last));
    context.insert("last_package_word".to_string(), last);
    context.insert("project_name".to_string(), project_name.to_string());
    Ok(context)
}

/// Maps descriptors onto target paths for one workspace.
///
/// Package segments are computed at most once per resolver.
pub struct TargetResolver<'a> {
    workspace: &'a WorkspaceDescriptor,
    module_dir: PathBuf,
    package_segments: Option<Vec<String>>,
}

impl<'a> TargetResolver<'a> {
    /// Create a resolver for a workspace.
    pub fn new(workspace: &'a WorkspaceDescriptor) -> Self {
        Self {
            workspace,
            module_dir: workspace.module_dir_or_default(),
            package_segments: None,
        }
    }

    fn package_segments(&mut self) -> Result<&[String]> {
        if self.package_segments.is_none() {
            let package = self.workspace.package_name.as_deref().ok_or_else(|| {
                DroidsyncError::invalid_input(format!(
                    "workspace '{}' has no package name",
                    self.workspace.name
                ))
            })?;
            self.package_segments = Some(package_segments(package)?);
        }
        Ok(self.package_segments.as_deref().unwrap_or_default())
    }

    /// Target path for a descriptor.
    pub fn resolve(&mut self, descriptor: &TemplateDescriptor) -> Result<PathBuf> {
        let (base, rest) = match descriptor.mode {
            TemplateMode::Root => (self.workspace.root_dir.clone(), &descriptor.segments[..]),
            TemplateMode::Module => (self.module_dir.clone(), &descriptor.segments[1..]),
            TemplateMode::Package => {
                let mut base = self.module_dir.join("src").join("main").join("java");
                for segment in self.package_segments()? {
                    base.push(segment);
                }
                (base, &descriptor.segments[1..])
            }
        };
        Ok(append_stripped(base, rest))
    }
}

fn append_stripped(mut base: PathBuf, segments: &[String]) -> PathBuf {
    let last = segments.len().saturating_sub(1);
    for (i, segment) in segments.iter().enumerate() {
        if i == last {
            base.push(strip_template_extension(segment));
        } else {
            base.push(segment);
        }
    }
    base
}

/// Checks and materializes the Android scaffold.
pub struct AndroidScaffoldGenerator<'a> {
    catalog: &'a TemplateCatalog,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> AndroidScaffoldGenerator<'a> {
    /// Create a generator.
    pub fn new(catalog: &'a TemplateCatalog, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { catalog, renderer }
    }

    /// Count scaffold targets present in a workspace.
    ///
    /// Package-mode targets count as missing when the workspace has no
    /// usable package name.
    pub async fn check(&self, workspace: &WorkspaceDescriptor) -> Result<ScaffoldSummary> {
        let descriptors = self.catalog.android_descriptors().await?;
        let mut resolver = TargetResolver::new(workspace);

        let mut present = 0;
        for descriptor in &descriptors {
            let Ok(target) = resolver.resolve(descriptor) else {
                continue;
            };
            if path_exists(&target).await {
                present += 1;
            }
        }

        Ok(ScaffoldSummary::new(descriptors.len(), present))
    }

    /// Render every Android template into the workspace, overwriting.
    ///
    /// Fails before writing anything when there are no templates, or when
    /// the workspace lacks a package or project name.
    pub async fn generate(&self, workspace: &WorkspaceDescriptor) -> Result<ScaffoldOutcome> {
        let descriptors = self.catalog.android_descriptors().await?;
        if descriptors.is_empty() {
            return Err(DroidsyncError::TemplatesNotFound {
                message: "no Android templates in the template directory".to_string(),
            });
        }

        let package = workspace
            .package_name
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                DroidsyncError::invalid_input("a package name is required to generate templates")
            })?;
        if workspace.name.trim().is_empty() {
            return Err(DroidsyncError::invalid_input(
                "a project name is required to generate templates",
            ));
        }

        let context = substitution_context(package, &workspace.name)?;
        let mut resolver = TargetResolver::new(workspace);

        let mut rendered = Vec::with_capacity(descriptors.len());
        for descriptor in &descriptors {
            let target = resolver.resolve(descriptor)?;
            let source = tokio::fs::read_to_string(&descriptor.source_path).await?;
            let content = self
                .renderer
                .render(&descriptor.relative_path, &source, &context)?;
            rendered.push((target, content));
        }

        for (target, content) in &rendered {
            write_file(target, content).await?;
        }

        tracing::info!(
            "Generated {} Android templates in {}",
            rendered.len(),
            workspace.root_dir.display()
        );

        Ok(ScaffoldOutcome {
            written: rendered.len(),
            summary: self.check(workspace).await?,
        })
    }
}

async fn write_file(target: &Path, content: &str) -> Result<()> {
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(target, content).await?;
    Ok(())
}
