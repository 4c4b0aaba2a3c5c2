use std::io::Write;
use std::time::{Duration, Instant};

const BAR_WIDTH: usize = 40;

/// Completed/total counter for a batch, optionally drawn as a one-line bar on stderr.
pub struct ProgressTracker {
    total: usize,
    completed: usize,
    started: Instant,
    draw: bool,
}

impl ProgressTracker {
    pub fn new(total: usize, draw: bool) -> Self {
        let tracker = Self {
            total,
            completed: 0,
            started: Instant::now(),
            draw,
        };
        tracker.render();
        tracker
    }

    /// A tracker that only counts, for tests and non-interactive runs.
    pub fn hidden(total: usize) -> Self {
        Self::new(total, false)
    }

    pub fn advance(&mut self, units: usize) {
        self.completed = (self.completed + units).min(self.total);
        tracing::debug!("Progress: {}/{}", self.completed, self.total);
        self.render();
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn finish(&self, message: &str) {
        if self.draw {
            eprintln!();
            println!("{}", message);
        }
        tracing::info!(
            "{} ({}/{} in {:?})",
            message,
            self.completed,
            self.total,
            self.elapsed()
        );
    }

    fn render(&self) {
        if !self.draw {
            return;
        }
        let mut stderr = std::io::stderr();
        // A failed redraw is not worth interrupting the batch for.
        let _ = write!(stderr, "\r{}", self.line());
        let _ = stderr.flush();
    }

    fn line(&self) -> String {
        let ratio = if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        };
        let filled = (ratio * BAR_WIDTH as f64).round() as usize;
        format!(
            "{} / {} [{}{}] {:>3}%",
            self.completed,
            self.total,
            "=".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            (ratio * 100.0).round() as u32
        )
    }
}
