//! Sync progress display.

use indicatif::{ProgressBar, ProgressStyle};

use crate::templates::{SyncProgress, SyncState};

use super::theme::DroidsyncTheme;
use super::ProgressHandle;

/// An `indicatif` bar counting files.
pub struct FileProgressBar {
    bar: ProgressBar,
}

impl FileProgressBar {
    /// Create a visible bar of `total` files.
    pub fn new(total: u64, message: &str) -> Self {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:24.green/dim}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉░");
        bar.set_style(style);
        bar.set_message(message.to_string());
        Self { bar }
    }

    /// Create a bar that draws nothing.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl ProgressHandle for FileProgressBar {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn println(&mut self, line: &str) {
        self.bar.println(line);
    }

    fn advance(&mut self) {
        self.bar.inc(1);
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Tallies of a finished sync run as seen by the display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncTally {
    pub copied: usize,
    pub skipped: usize,
    pub failed: Vec<(String, String)>,
    pub total: usize,
}

/// Drives a [`ProgressHandle`] from sync progress events.
pub struct SyncDisplay {
    handle: Box<dyn ProgressHandle>,
    theme: DroidsyncTheme,
    show_files: bool,
    tally: SyncTally,
}

impl SyncDisplay {
    /// Wrap a progress handle; `show_files` prints one line per finished file.
    pub fn new(handle: Box<dyn ProgressHandle>, show_files: bool) -> Self {
        Self {
            handle,
            theme: DroidsyncTheme::detect(),
            show_files,
            tally: SyncTally::default(),
        }
    }

    /// Apply one event.
    pub fn apply(&mut self, event: &SyncProgress) {
        let path = event.relative_path.as_deref().unwrap_or_default();
        match event.state {
            SyncState::Start => self.handle.set_message(path),
            SyncState::Success | SyncState::Skipped | SyncState::Error => {
                match event.state {
                    SyncState::Success => self.tally.copied += 1,
                    SyncState::Skipped => self.tally.skipped += 1,
                    _ => self.tally.failed.push((
                        path.to_string(),
                        event.error.clone().unwrap_or_default(),
                    )),
                }
                if self.show_files {
                    let line = self.theme.format_sync_state(event.state, path);
                    self.handle.println(&line);
                }
                self.handle.advance();
            }
            SyncState::Complete => {
                if let Some(copied) = event.copied_count {
                    self.tally.copied = copied;
                }
                if let Some(total) = event.total_count {
                    self.tally.total = total;
                }
                self.handle.finish();
            }
        }
    }

    /// Counts seen so far.
    pub fn tally(&self) -> &SyncTally {
        &self.tally
    }
}
