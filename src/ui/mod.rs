//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - Sync progress display in [`progress`]
//!
//! # Example
//!
//! ```
//! use droidsync::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("MyApp");
//! ui.success("Templates synced");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod terminal;
pub mod theme;

pub use mock::{MockProgress, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::{FileProgressBar, SyncDisplay, SyncTally};
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, DroidsyncTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Start a progress display over `total` items.
    fn start_progress(&mut self, total: u64, message: &str) -> Box<dyn ProgressHandle>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a progress display.
pub trait ProgressHandle {
    /// Update the current item label.
    fn set_message(&mut self, msg: &str);

    /// Print a line above the display.
    fn println(&mut self, line: &str);

    /// Count one item as done.
    fn advance(&mut self);

    /// Remove the display.
    fn finish(&mut self);
}

/// Progress handle that draws nothing.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressHandle for NoopProgress {
    fn set_message(&mut self, _msg: &str) {}
    fn println(&mut self, _line: &str) {}
    fn advance(&mut self) {}
    fn finish(&mut self) {}
}
