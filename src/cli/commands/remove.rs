//! Remove command implementation.

use crate::cli::args::RemoveArgs;
use crate::error::{DroidsyncError, Result};
use crate::service::WorkspaceService;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The remove command implementation.
pub struct RemoveCommand<'a> {
    service: &'a WorkspaceService,
    args: RemoveArgs,
}

impl<'a> RemoveCommand<'a> {
    /// Create a new remove command.
    pub fn new(service: &'a WorkspaceService, args: RemoveArgs) -> Self {
        Self { service, args }
    }
}

impl Command for RemoveCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if !self.service.remove_workspace(&self.args.id)? {
            return Err(DroidsyncError::WorkspaceNotFound {
                id: self.args.id.clone(),
            });
        }
        ui.success(&format!("Removed workspace {}", self.args.id));
        Ok(CommandResult::success())
    }
}
