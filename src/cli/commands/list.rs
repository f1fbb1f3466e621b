//! List command implementation.
//!
//! The `droidsync list` command lists registered workspaces.

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::service::WorkspaceService;
use crate::ui::theme::DroidsyncTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand<'a> {
    service: &'a WorkspaceService,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(service: &'a WorkspaceService, args: ListArgs) -> Self {
        Self { service, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let workspaces = self.service.list_workspaces();

        if self.args.json {
            let json = serde_json::to_string_pretty(&workspaces)
                .map_err(|e| anyhow::anyhow!("failed to serialize workspaces: {}", e))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if workspaces.is_empty() {
            ui.message("No workspaces registered. Run 'droidsync add' first.");
            return Ok(CommandResult::success());
        }

        let theme = DroidsyncTheme::detect();
        ui.message(&format!("  {}", theme.key.apply_to("Workspaces:")));
        for workspace in &workspaces {
            ui.message(&format!(
                "    {} {} {}",
                theme.highlight.apply_to(&workspace.name),
                theme.dim.apply_to("·"),
                theme.format_status(workspace.android_template_status),
            ));
            ui.message(&format!(
                "      {} {}",
                theme.dim.apply_to("id:"),
                theme.path.apply_to(&workspace.id)
            ));
            ui.message(&format!(
                "      {} {}",
                theme.dim.apply_to("root:"),
                theme.path.apply_to(workspace.root_dir.display())
            ));
            let package = match &workspace.package_name {
                Some(name) => format!("{} ({})", name, workspace.package_source),
                None => "none".to_string(),
            };
            ui.message(&format!("      {} {}", theme.dim.apply_to("package:"), package));
        }

        Ok(CommandResult::success())
    }
}
