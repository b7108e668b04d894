//! Progress reporting
//!
//! The engine reports byte counts through `TransferObserver`; rendering
//! them is up to the implementation.

use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;
use std::time::Duration;

const BAR_TEMPLATE: &str = "{prefix:<19} [{bar:24}] {msg}";
const DOWNLOADING: &str = "Downloading...";
const COMPLETE: &str = "Download complete!";

/// Receives progress and completion notifications from a transfer.
pub trait TransferObserver {
    /// Called after every chunk written to the destination.
    fn on_progress(&mut self, transferred: u64, total: u64);

    /// Called once after the session completed successfully.
    fn on_complete(&mut self, transferred: u64, elapsed: Duration);
}

/// Discards progress; statistics are only logged.
#[derive(Debug, Default)]
pub struct NoProgress;

impl TransferObserver for NoProgress {
    fn on_progress(&mut self, _transferred: u64, _total: u64) {}

    fn on_complete(&mut self, transferred: u64, elapsed: Duration) {
        info!(
            "Transferred {} in {:.3} s",
            HumanBytes(transferred),
            elapsed.as_secs_f64()
        );
    }
}

/// Terminal progress bar followed by a statistics block on stdout.
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    pub fn stdout() -> Self {
        Self::with_bar(ProgressBar::with_draw_target(
            Some(0),
            ProgressDrawTarget::stdout(),
        ))
    }

    /// Render through an existing bar, e.g. `ProgressBar::hidden()`.
    pub fn with_bar(bar: ProgressBar) -> Self {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.set_prefix(DOWNLOADING);
        Self { bar }
    }

    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }
}

impl TransferObserver for ConsoleProgress {
    fn on_progress(&mut self, transferred: u64, total: u64) {
        if self.bar.is_finished() {
            return;
        }

        self.bar.set_length(total);
        self.bar.set_position(transferred);

        if transferred >= total {
            self.bar.set_prefix(COMPLETE);
            self.bar.finish_with_message("100.0%");
        } else {
            let percentage = transferred as f64 * 100.0 / total as f64;
            self.bar.set_message(format!("{:.1}%", percentage));
        }
    }

    fn on_complete(&mut self, transferred: u64, elapsed: Duration) {
        // Short transfers never reach 100%
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
        print!("{}", render_statistics(transferred, elapsed));
    }
}

/// The statistics block printed after a completed download.
pub fn render_statistics(bytes: u64, elapsed: Duration) -> String {
    let total_time = elapsed.as_secs_f64();
    let speed = if total_time > 0.0 {
        (bytes as f64 / total_time) as u64
    } else {
        bytes
    };

    format!(
        "\n============ STATISTICS ============\n\
         Total transfer time: {:.3} s\n\
         Total transferred bytes: {}\n\
         Transfer speed: {}/s\n\
         ====================================\n\n",
        total_time,
        HumanBytes(bytes),
        HumanBytes(speed)
    )
}
