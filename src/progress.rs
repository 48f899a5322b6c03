//! Stderr progress for check, fix and migrate runs

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner or per-project counter; draws nothing when disabled
pub struct Progress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a reporter; pass false for quiet or JSON output
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    fn install(&mut self, bar: ProgressBar, message: &str, tick: Duration) {
        bar.set_message(message.to_string());
        bar.enable_steady_tick(tick);
        self.bar = Some(bar);
    }

    /// Spinner while `fix` reconciles projects concurrently
    pub fn spinner(&mut self, message: &str) {
        if !self.enabled {
            return;
        }
        let spinner = ProgressBar::new_spinner().with_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} ({elapsed})")
                .expect("Invalid template"),
        );
        self.install(spinner, message, Duration::from_millis(120));
    }

    /// Counter over `projects` for sequential runs
    pub fn start(&mut self, projects: u64, message: &str) {
        if !self.enabled {
            return;
        }
        let bar = ProgressBar::new(projects).with_style(
            ProgressStyle::default_bar()
                .template("{msg:40!} {wide_bar:.green/white} {pos}/{len} projects")
                .expect("Invalid template")
                .progress_chars("=> "),
        );
        self.install(bar, message, Duration::from_millis(200));
    }

    pub fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Removes the bar so report output starts on a clean line
    pub fn finish_and_clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
