//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const FILE_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}";

/// Progress reporter for corpus files
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
    examples: usize,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
            examples: 0,
        }
    }

    /// Initialize progress bar for corpus files
    pub fn init_files(&mut self, total_files: u64) {
        if self.quiet {
            return;
        }

        let style = ProgressStyle::default_bar()
            .template(FILE_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        let pb = ProgressBar::new(total_files);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a completed file
    pub fn file_completed(&mut self, filename: &str, examples: usize) {
        self.examples += examples;
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("{} examples ({filename})", self.examples));
            pb.inc(1);
        }
    }

    /// Examples reported so far
    pub fn examples(&self) -> usize {
        self.examples
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("{} examples", self.examples));
        }
    }
}
