//! Agents command implementation.
//!
//! `droidsync agents show` prints the shared `AGENTS.md`;
//! `droidsync agents save <FILE>` replaces it.

use std::io::Write;
use std::path::PathBuf;

use tokio::runtime::Handle;

use crate::error::{DroidsyncError, Result};
use crate::service::WorkspaceService;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// What to do with `AGENTS.md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentsAction {
    Show,
    Save(PathBuf),
}

/// The agents command implementation.
pub struct AgentsCommand<'a> {
    service: &'a WorkspaceService,
    runtime: Handle,
    action: AgentsAction,
}

impl<'a> AgentsCommand<'a> {
    /// Create a new agents command.
    pub fn new(service: &'a WorkspaceService, runtime: Handle, action: AgentsAction) -> Self {
        Self {
            service,
            runtime,
            action,
        }
    }
}

impl Command for AgentsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.action {
            AgentsAction::Show => {
                let content = self.runtime.block_on(self.service.load_agents())?;
                if content.is_empty() {
                    ui.warning("AGENTS.md is empty or missing");
                } else {
                    let mut stdout = std::io::stdout();
                    stdout.write_all(content.as_bytes())?;
                    stdout.flush()?;
                }
            }
            AgentsAction::Save(file) => {
                let content = std::fs::read_to_string(file).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        DroidsyncError::invalid_input(format!(
                            "file not found: {}",
                            file.display()
                        ))
                    } else {
                        DroidsyncError::Io(e)
                    }
                })?;
                self.runtime
                    .block_on(self.service.save_agents(&content))?;
                ui.success("Saved AGENTS.md");
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::{runtime, service};
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn save_replaces_template() {
        let tpl = TempDir::new().unwrap();
        let src = TempDir::new().unwrap();
        let file = src.path().join("rules.md");
        fs::write(&file, "# Rules\n").unwrap();
        let rt = runtime();
        let service = service(tpl.path());
        let mut ui = MockUI::new();

        AgentsCommand::new(&service, rt.handle().clone(), AgentsAction::Save(file))
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_success("Saved"));
        assert_eq!(
            fs::read_to_string(tpl.path().join("AGENTS.md")).unwrap(),
            "# Rules\n"
        );
    }

    #[test]
    fn show_warns_when_missing() {
        let tpl = TempDir::new().unwrap();
        let rt = runtime();
        let service = service(tpl.path());
        let mut ui = MockUI::new();

        AgentsCommand::new(&service, rt.handle().clone(), AgentsAction::Show)
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_warning("AGENTS.md"));
    }

    #[test]
    fn save_missing_file_is_invalid() {
        let tpl = TempDir::new().unwrap();
        let rt = runtime();
        let service = service(tpl.path());
        let mut ui = MockUI::new();

        let err = AgentsCommand::new(
            &service,
            rt.handle().clone(),
            AgentsAction::Save(PathBuf::from("/nonexistent/rules.md")),
        )
        .execute(&mut ui)
        .unwrap_err();

        assert!(matches!(err, DroidsyncError::InvalidInput { .. }));
    }
}
