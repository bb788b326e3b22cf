use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{is_quiet, management::ProgressObserver, utils};

/// Renders download progress on the terminal.
///
/// Shows a byte bar with percentage when the size is known, a spinner with the
/// running total otherwise. Draws nothing in quiet mode.
pub struct BarProgress {
    bar: Option<ProgressBar>,
    bounded: bool,
}

impl BarProgress {
    pub fn new() -> Self {
        Self {
            bar: None,
            bounded: false,
        }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for BarProgress {
    fn started(&mut self, expected: Option<u64>) {
        if is_quiet() {
            return;
        }

        let bar = match expected {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::with_template(
                        "{bar:40.blue/white} {bytes}/{total_bytes} ({percent}%) {bytes_per_sec}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                self.bounded = true;
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.enable_steady_tick(Duration::from_millis(100));
                pb.set_style(
                    ProgressStyle::with_template("{spinner:.blue} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner())
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
                );
                pb.set_message("Downloading...");
                pb
            }
        };
        self.bar = Some(bar);
    }

    fn advanced(&mut self, downloaded: u64) {
        let Some(bar) = &self.bar else { return };
        if self.bounded {
            bar.set_position(downloaded);
        } else {
            bar.set_message(format!("Downloaded: {:.2} MB", utils::megabytes(downloaded)));
        }
    }

    fn finished(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
