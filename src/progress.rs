//! Progress display for long-running steps

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown on stderr while extracting and analyzing
///
/// indicatif hides it automatically when stderr is not a terminal.
pub struct ProgressDisplay {
    spinner: ProgressBar,
}

impl ProgressDisplay {
    /// Create a spinner, hidden entirely when `enabled` is false
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                spinner: ProgressBar::hidden(),
            };
        }

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(100));

        Self { spinner }
    }

    /// Update to show the current step
    pub fn step(&self, message: &str) {
        self.spinner.set_message(message.to_string());
    }

    /// Remove the spinner once done
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.spinner.abandon();
    }
}
