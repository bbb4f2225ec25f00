//! Progress display for generation workers

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

/// Coordinates progress display for parallel generation
///
/// Shows one spinner per worker (up to a fixed number of lines) with the
/// candidates it has drawn for its current board, and one bar counting
/// accepted boards. All methods take `&self` so workers can report from
/// their own threads.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    boards_bar: Option<ProgressBar>,
    worker_bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static WORKER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BOARDS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Boards: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            boards_bar: None,
            worker_bars: Vec::new(),
        }
    }

    /// Create the worker spinners and the board counter
    pub fn initialize(&mut self, workers: usize, boards: usize) {
        let boards_bar = ProgressBar::new(boards as u64);
        boards_bar.set_style(BOARDS_STYLE.clone());
        self.boards_bar = Some(self.multi_progress.add(boards_bar));

        // Larger pools only show their first workers
        for worker in 0..workers.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new_spinner();
            bar.set_style(WORKER_STYLE.clone());
            bar.set_prefix(format!("worker {worker}"));
            bar.enable_steady_tick(Duration::from_millis(120));
            self.worker_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Report candidates drawn by a worker for its current board
    pub fn update_worker(&self, worker: usize, attempts: usize) {
        if let Some(bar) = self.worker_bars.get(worker) {
            bar.set_message(format!("{attempts} candidates"));
        }
    }

    /// Count an accepted board
    pub fn board_found(&self, worker: usize, attempts: usize, solutions: usize) {
        if let Some(ref boards_bar) = self.boards_bar {
            boards_bar.inc(1);
        }
        if let Some(bar) = self.worker_bars.get(worker) {
            bar.set_message(format!(
                "✓ accepted after {attempts} candidates ({solutions} solutions)"
            ));
        }
    }

    /// Number of worker lines on display
    pub const fn worker_lines(&self) -> usize {
        self.worker_bars.len()
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        for bar in &self.worker_bars {
            bar.finish_and_clear();
        }
        if let Some(ref boards_bar) = self.boards_bar {
            boards_bar.finish_with_message("All boards generated");
        }
        let _ = self.multi_progress.clear();
    }
}
