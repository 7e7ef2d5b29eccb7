// Console progress reporter
// Renders an indicatif bar behind the ProgressReporter trait

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

use crate::hash::ProgressReporter;

/// Reporter that draws a percentage bar on stderr
///
/// Only constructed when stderr is attached to a terminal, so redirected
/// output never picks up control sequences. The console never cancels.
pub struct ConsoleReporter {
    bar: ProgressBar,
}

impl ConsoleReporter {
    /// Create a reporter, or None when stderr is not a terminal
    pub fn new(label: &str) -> Option<Self> {
        if !std::io::stderr().is_terminal() {
            return None;
        }

        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg}\n[{bar:40.cyan/blue}] {pos}%")
                .unwrap()
                .progress_chars("#>-"),
        );
        bar.set_message(label.to_string());

        Some(Self { bar })
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for ConsoleReporter {
    fn report_percent(&self, percent: u8) {
        self.bar.set_position(u64::from(percent));
    }

    fn is_cancelled(&self) -> bool {
        false
    }
}
