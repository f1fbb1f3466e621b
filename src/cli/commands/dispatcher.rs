//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use tokio::runtime::{Builder, Runtime};

use crate::cli::args::{AgentsCommand, AndroidCommand, Cli, Commands, TemplatesCommand};
use crate::config::load_settings;
use crate::error::{DroidsyncError, Result};
use crate::service::WorkspaceService;
use crate::ui::UserInterface;

/// Exit code for a workspace id that is not registered.
pub const EXIT_UNKNOWN_WORKSPACE: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
///
/// The dispatcher owns the async runtime; commands block on it.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    runtime: Runtime,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self> {
        let runtime = Builder::new_multi_thread().enable_all().build()?;
        Ok(Self {
            project_root,
            config_path,
            runtime,
        })
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn service(&self) -> Result<WorkspaceService> {
        let settings = load_settings(self.config_path.as_deref())?;
        tracing::debug!("Using droidsync home {}", settings.home.display());
        WorkspaceService::from_settings(&settings)
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. An unknown workspace id is reported here and mapped
    /// to [`EXIT_UNKNOWN_WORKSPACE`].
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.route(cli, ui) {
            Err(e @ DroidsyncError::WorkspaceNotFound { .. }) => {
                ui.error(&e.to_string());
                ui.message("Run 'droidsync list' to see registered workspaces.");
                Ok(CommandResult::failure(EXIT_UNKNOWN_WORKSPACE))
            }
            other => other,
        }
    }

    fn route(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Some(Commands::Completions(args)) = &cli.command {
            return super::completions::CompletionsCommand::new(args.clone()).execute(ui);
        }

        let service = self.service()?;
        let handle = self.runtime.handle().clone();

        match &cli.command {
            Some(Commands::Add(args)) => {
                let path = args.path.clone().unwrap_or_else(|| self.project_root.clone());
                super::add::AddCommand::new(&service, handle, path).execute(ui)
            }
            Some(Commands::List(args)) => {
                super::list::ListCommand::new(&service, args.clone()).execute(ui)
            }
            Some(Commands::Remove(args)) => {
                super::remove::RemoveCommand::new(&service, args.clone()).execute(ui)
            }
            Some(Commands::Templates(args)) => match &args.command {
                TemplatesCommand::Check(check) => super::templates::TemplatesCheckCommand::new(
                    &service,
                    handle,
                    &self.project_root,
                    check.clone(),
                )
                .execute(ui),
                TemplatesCommand::Sync(sync) => super::templates::TemplatesSyncCommand::new(
                    &service,
                    handle,
                    &self.project_root,
                    sync.clone(),
                )
                .execute(ui),
            },
            Some(Commands::Android(args)) => {
                let (action, id) = match &args.command {
                    AndroidCommand::Check(a) => (super::android::ScaffoldAction::Check, &a.id),
                    AndroidCommand::Generate(a) => {
                        (super::android::ScaffoldAction::Generate, &a.id)
                    }
                };
                super::android::AndroidCommand::new(&service, handle, action, id).execute(ui)
            }
            Some(Commands::Agents(args)) => {
                let action = match &args.command {
                    AgentsCommand::Show => super::agents::AgentsAction::Show,
                    AgentsCommand::Save(save) => super::agents::AgentsAction::Save(save.file.clone()),
                };
                super::agents::AgentsCommand::new(&service, handle, action).execute(ui)
            }
            Some(Commands::Completions(_)) => Ok(CommandResult::success()),
            None => super::list::ListCommand::new(&service, Default::default()).execute(ui),
        }
    }
}
