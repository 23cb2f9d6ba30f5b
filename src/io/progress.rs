//! Well-by-well progress display

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::plate::geometry::WellPosition;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static WELL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Wells: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}} {{prefix}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many wells of the plate have been described
pub struct ProgressManager {
    bar: ProgressBar,
    anomalies: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a hidden progress manager; [`initialize`](Self::initialize) shows it
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            anomalies: 0,
        }
    }

    /// Show a bar sized for `well_count` wells
    pub fn initialize(&mut self, well_count: usize) {
        let bar = ProgressBar::new(well_count as u64);
        bar.set_style(WELL_STYLE.clone());
        self.bar = bar;
        self.anomalies = 0;
    }

    /// Announce the well about to be described
    pub fn start_well(&self, position: &WellPosition, subdirectory: Option<&str>) {
        let message = match subdirectory {
            Some(name) => format!("{} <- {name}", position.label()),
            None => position.label(),
        };
        self.bar.set_message(message);
    }

    /// Count one more well as done, noting whether it raised anomalies
    pub fn complete_well(&mut self, anomalies: usize) {
        self.anomalies += anomalies;
        if self.anomalies > 0 {
            self.bar.set_prefix(format!("({} warnings)", self.anomalies));
        }
        self.bar.inc(1);
    }

    /// Warnings counted so far
    pub const fn anomalies(&self) -> usize {
        self.anomalies
    }

    /// Wells completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Clear the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
