//! Android scaffold commands.

use tokio::runtime::Handle;

use crate::error::Result;
use crate::service::{ScaffoldActionResult, WorkspaceService};
use crate::ui::theme::DroidsyncTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// What to do with a workspace's scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldAction {
    Check,
    Generate,
}

/// The `android check|generate` command implementation.
pub struct AndroidCommand<'a> {
    service: &'a WorkspaceService,
    runtime: Handle,
    action: ScaffoldAction,
    id: String,
}

impl<'a> AndroidCommand<'a> {
    /// Create a new scaffold command.
    pub fn new(
        service: &'a WorkspaceService,
        runtime: Handle,
        action: ScaffoldAction,
        id: &str,
    ) -> Self {
        Self {
            service,
            runtime,
            action,
            id: id.to_string(),
        }
    }

    fn report(&self, ui: &mut dyn UserInterface, result: &ScaffoldActionResult) {
        let theme = DroidsyncTheme::detect();
        ui.show_header(&result.project.name);

        if let Some(written) = result.written {
            ui.success(&format!("Wrote {} Android files", written));
        }

        let summary = &result.summary;
        ui.message(&format!(
            "  {} {} ({} of {} present, {} missing)",
            theme.key.apply_to("status:"),
            theme.format_status(summary.status),
            summary.present,
            summary.total,
            summary.missing
        ));
    }
}

impl Command for AndroidCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let result = match self.action {
            ScaffoldAction::Check => self
                .runtime
                .block_on(self.service.check_android_scaffold(&self.id))?,
            ScaffoldAction::Generate => self
                .runtime
                .block_on(self.service.generate_android_scaffold(&self.id))?,
        };
        self.report(ui, &result);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::test_support::{runtime, service};
    use crate::error::DroidsyncError;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, TempDir) {
        let tpl = TempDir::new().unwrap();
        fs::create_dir_all(tpl.path().join("android/__package__")).unwrap();
        fs::write(
            tpl.path().join("android/__package__/App.kt.hbs"),
            "package {{base_package}}",
        )
        .unwrap();
        fs::write(tpl.path().join("android/settings.gradle.kts.hbs"), "// {{project_name}}")
            .unwrap();

        let ws = TempDir::new().unwrap();
        fs::create_dir_all(ws.path().join("app")).unwrap();
        fs::write(
            ws.path().join("app/build.gradle.kts"),
            "android { namespace = \"com.example.demo\" }",
        )
        .unwrap();
        (tpl, ws)
    }

    #[test]
    fn check_then_generate() {
        let (tpl, ws) = setup();
        let rt = runtime();
        let service = service(tpl.path());
        let id = rt.block_on(service.add_workspace(ws.path())).unwrap().id;
        let mut ui = MockUI::new();

        AndroidCommand::new(&service, rt.handle().clone(), ScaffoldAction::Check, &id)
            .execute(&mut ui)
            .unwrap();
        assert!(ui.has_message("0 of 2 present, 2 missing"));

        AndroidCommand::new(&service, rt.handle().clone(), ScaffoldAction::Generate, &id)
            .execute(&mut ui)
            .unwrap();
        assert!(ui.has_success("Wrote 2 Android files"));
        assert!(ui.has_message("2 of 2 present, 0 missing"));
        assert!(ws
            .path()
            .join("app/src/main/java/com/example/demo/App.kt")
            .exists());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let (tpl, _ws) = setup();
        let rt = runtime();
        let service = service(tpl.path());
        let mut ui = MockUI::new();

        let err = AndroidCommand::new(&service, rt.handle().clone(), ScaffoldAction::Check, "x")
            .execute(&mut ui)
            .unwrap_err();

        assert!(matches!(err, DroidsyncError::WorkspaceNotFound { .. }));
    }
}
