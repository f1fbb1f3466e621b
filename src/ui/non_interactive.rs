//! Non-interactive UI for CI/headless environments.

use super::{NoopProgress, OutputMode, ProgressHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// No progress bars are drawn; per-item lines still print in verbose mode.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

/// Progress handle that prints lines and nothing else.
struct LineProgress;

impl ProgressHandle for LineProgress {
    fn set_message(&mut self, _msg: &str) {}

    fn println(&mut self, line: &str) {
        println!("  {}", line);
    }

    fn advance(&mut self) {}

    fn finish(&mut self) {}
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn start_progress(&mut self, _total: u64, _message: &str) -> Box<dyn ProgressHandle> {
        if self.mode.shows_details() {
            Box::new(LineProgress)
        } else {
            Box::new(NoopProgress)
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
