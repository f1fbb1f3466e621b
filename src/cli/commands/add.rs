//! Add command implementation.
//!
//! The `droidsync add` command resolves a workspace root and registers it.

use std::path::{Path, PathBuf};

use tokio::runtime::Handle;

use crate::error::Result;
use crate::service::WorkspaceService;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The add command implementation.
pub struct AddCommand<'a> {
    service: &'a WorkspaceService,
    runtime: Handle,
    path: PathBuf,
}

impl<'a> AddCommand<'a> {
    /// Create a new add command.
    pub fn new(service: &'a WorkspaceService, runtime: Handle, path: PathBuf) -> Self {
        Self {
            service,
            runtime,
            path,
        }
    }

    /// Get the path being added.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Command for AddCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let workspace = self
            .runtime
            .block_on(self.service.add_workspace(&self.path))?;

        ui.success(&format!("Added {} ({})", workspace.name, workspace.id));

        match (&workspace.package_name, &workspace.module_dir) {
            (Some(package), Some(module)) => ui.message(&format!(
                "  package: {} (from {} in {})",
                package,
                workspace.package_source,
                module.display()
            )),
            (Some(package), None) => ui.message(&format!(
                "  package: {} (from {})",
                package, workspace.package_source
            )),
            (None, _) => ui.warning("No package name detected"),
        }

        for warning in &workspace.warnings {
            ui.warning(warning);
        }

        if ui.output_mode().shows_details() {
            for file in &workspace.files_checked {
                ui.message(&format!("  checked {}", file.display()));
            }
        }

        Ok(CommandResult::success())
    }
}
