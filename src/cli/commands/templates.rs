//! Template commands.
//!
//! `droidsync templates check` reports which general templates exist in
//! the project directory; `droidsync templates sync` copies them in while
//! following the run's progress stream.

use std::path::{Path, PathBuf};

use tokio::runtime::Handle;
use tokio::sync::broadcast::error::RecvError;

use crate::cli::args::{TemplatesCheckArgs, TemplatesSyncArgs};
use crate::error::Result;
use crate::service::WorkspaceService;
use crate::templates::{SyncRequest, SyncResult};
use crate::ui::theme::DroidsyncTheme;
use crate::ui::{SyncDisplay, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The `templates check` command implementation.
pub struct TemplatesCheckCommand<'a> {
    service: &'a WorkspaceService,
    runtime: Handle,
    project_root: PathBuf,
    args: TemplatesCheckArgs,
}

impl<'a> TemplatesCheckCommand<'a> {
    /// Create a new check command.
    pub fn new(
        service: &'a WorkspaceService,
        runtime: Handle,
        project_root: &Path,
        args: TemplatesCheckArgs,
    ) -> Self {
        Self {
            service,
            runtime,
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for TemplatesCheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let status = self
            .runtime
            .block_on(self.service.check_templates(&self.project_root))?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&status)
                .map_err(|e| anyhow::anyhow!("failed to serialize status: {}", e))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let theme = DroidsyncTheme::detect();
        for (path, present) in &status {
            if *present {
                ui.message(&theme.format_success(path));
            } else {
                ui.message(&theme.format_skipped(&format!("{} (missing)", path)));
            }
        }

        let present = status.values().filter(|p| **p).count();
        ui.message(&format!("{} of {} templates present", present, status.len()));
        Ok(CommandResult::success())
    }
}

/// The `templates sync` command implementation.
pub struct TemplatesSyncCommand<'a> {
    service: &'a WorkspaceService,
    runtime: Handle,
    project_root: PathBuf,
    args: TemplatesSyncArgs,
}

impl<'a> TemplatesSyncCommand<'a> {
    /// Create a new sync command.
    pub fn new(
        service: &'a WorkspaceService,
        runtime: Handle,
        project_root: &Path,
        args: TemplatesSyncArgs,
    ) -> Self {
        Self {
            service,
            runtime,
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn request(&self) -> SyncRequest {
        SyncRequest {
            project_dir: self.project_root.clone(),
            mode: self.args.effective_mode(),
            files: self.args.files.clone(),
        }
    }

    async fn run(&self, request: &SyncRequest, display: &mut SyncDisplay) -> Result<SyncResult> {
        let mut rx = self.service.subscribe();
        let sync = self.service.sync_templates(request);
        tokio::pin!(sync);

        let result = loop {
            tokio::select! {
                biased;
                event = rx.recv() => match event {
                    Ok(event) => display.apply(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!("Progress display skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break (&mut sync).await,
                },
                result = &mut sync => break result,
            }
        };

        while let Ok(event) = rx.try_recv() {
            display.apply(&event);
        }
        result
    }
}

impl Command for TemplatesSyncCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let request = self.request();
        let planned = self.runtime.block_on(self.service.plan_sync(&request))?;

        if planned.is_empty() {
            ui.success("All templates already present");
        }

        let progress = ui.start_progress(planned.len() as u64, "Syncing templates");
        let mut display = SyncDisplay::new(progress, ui.output_mode().shows_details());
        self.runtime.block_on(self.run(&request, &mut display))?;

        let tally = display.tally();
        for (path, error) in &tally.failed {
            ui.warning(&format!("{}: {}", path, error));
        }

        if !planned.is_empty() {
            ui.success(&format!(
                "Copied {} of {} templates ({})",
                tally.copied, tally.total, request.mode
            ));
        }

        if tally.failed.is_empty() {
            Ok(CommandResult::success())
        } else {
            ui.error(&format!("{} templates failed to sync", tally.failed.len()));
            Ok(CommandResult::failure(1))
        }
    }
}
