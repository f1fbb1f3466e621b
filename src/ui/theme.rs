//! Visual theme and styling.

use console::Style;

use crate::templates::SyncState;
use crate::workspace::AndroidTemplateStatus;

/// droidsync's visual theme.
#[derive(Debug, Clone)]
pub struct DroidsyncTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for running elements (green, the Android accent).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (green bold).
    pub header: Style,
    /// Style for key labels in key-value displays (bold).
    pub key: Style,
    /// Style for paths and ids (dim italic).
    pub path: Style,
}

impl Default for DroidsyncTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DroidsyncTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().green(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().green(),
            key: Style::new().bold(),
            path: Style::new().dim().italic(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
            path: Style::new(),
        }
    }

    /// Theme matching the current environment.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped message (icon + text in dim).
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("▲"),
            self.highlight.apply_to(title)
        )
    }

    /// Format a per-file sync outcome.
    pub fn format_sync_state(&self, state: SyncState, path: &str) -> String {
        match state {
            SyncState::Success => self.format_success(path),
            SyncState::Skipped => self.format_skipped(path),
            SyncState::Error => self.format_error(path),
            SyncState::Start | SyncState::Complete => path.to_string(),
        }
    }

    /// Format a scaffold status word.
    pub fn format_status(&self, status: AndroidTemplateStatus) -> String {
        let style = match status {
            AndroidTemplateStatus::Ready => &self.success,
            AndroidTemplateStatus::Incomplete => &self.warning,
            AndroidTemplateStatus::NotStarted => &self.dim,
        };
        style.apply_to(status.as_str()).to_string()
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
