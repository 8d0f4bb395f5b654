//! Progress bar for terminal output during scanning.
//!
//! Uses Braille pattern characters for a modern, high-density display.

use indicatif::{ProgressBar, ProgressStyle};

/// Minimum number of files to display progress bar
const MIN_FILES_FOR_PROGRESS: usize = 10;

/// Progress bar manager for scan operations.
pub struct ScanProgress {
    bar: Option<ProgressBar>,
}

impl ScanProgress {
    /// Create a new progress bar if conditions are met.
    ///
    /// Progress bar is only shown if enabled by the caller (interactive
    /// terminal, not CI, per-file logging quieted) and total files >= 10.
    pub fn new(total_files: usize, enabled: bool) -> Self {
        let bar = if should_show_progress(total_files, enabled) {
            Some(create_progress_bar(total_files))
        } else {
            None
        };

        Self { bar }
    }

    /// Increment progress by one file.
    pub fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Finish and clear the progress bar.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}

/// Check if progress bar should be displayed.
fn should_show_progress(total_files: usize, enabled: bool) -> bool {
    enabled && total_files >= MIN_FILES_FOR_PROGRESS
}

/// Create a progress bar with Braille pattern style.
fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "Scanning {bar:40} {pos:>4}/{len:4} files ({percent:>3}%) [{elapsed_precise} < {eta_precise}]",
        )
        .expect("Invalid progress bar template")
        .progress_chars("⣿⣀ "), // Braille pattern: filled, current, empty
    );
    pb
}
