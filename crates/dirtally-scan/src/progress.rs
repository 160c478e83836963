//! Walk progress reporting.

use std::time::{Duration, Instant};

use dirtally_core::TraversalResult;
use tokio::sync::broadcast;

/// Progress information during a run.
#[derive(Debug, Clone)]
pub struct WalkProgress {
    /// Number of files recorded so far.
    pub files_scanned: u64,
    /// Number of directories visited so far.
    pub folders_scanned: u64,
    /// Total bytes recorded so far.
    pub bytes_scanned: u64,
    /// Time elapsed since the run started.
    pub elapsed: Duration,
    /// Set on the last event of a run.
    pub finished: bool,
}

impl WalkProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_scanned: 0,
            folders_scanned: 0,
            bytes_scanned: 0,
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    fn from_counters(counters: &TraversalResult, elapsed: Duration, finished: bool) -> Self {
        Self {
            files_scanned: counters.file_count,
            folders_scanned: counters.folder_count,
            bytes_scanned: counters.total_bytes,
            elapsed,
            finished,
        }
    }

    /// Calculate scan rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_scanned as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Calculate scan rate in bytes per second.
    pub fn bytes_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.bytes_scanned as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for WalkProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Sends a progress event every `interval` recorded files.
#[derive(Debug)]
pub(crate) struct ProgressTicker<'a> {
    tx: &'a broadcast::Sender<WalkProgress>,
    interval: u64,
    start: Instant,
}

impl<'a> ProgressTicker<'a> {
    pub fn new(tx: &'a broadcast::Sender<WalkProgress>, interval: u64, start: Instant) -> Self {
        Self {
            tx,
            interval: interval.max(1),
            start,
        }
    }

    /// Called after the `nth` file (1-based) has been recorded.
    pub fn tick(&self, nth: u64, counters: impl FnOnce() -> TraversalResult) {
        if nth % self.interval != 0 || self.tx.receiver_count() == 0 {
            return;
        }
        let _ = self.tx.send(WalkProgress::from_counters(
            &counters(),
            self.start.elapsed(),
            false,
        ));
    }

    pub fn finish(&self, counters: &TraversalResult) {
        let _ = self
            .tx
            .send(WalkProgress::from_counters(counters, self.start.elapsed(), true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let progress = WalkProgress {
            files_scanned: 100,
            bytes_scanned: 1000,
            elapsed: Duration::from_secs(2),
            ..WalkProgress::new()
        };
        assert_eq!(progress.files_per_second(), 50.0);
        assert_eq!(progress.bytes_per_second(), 500.0);
        assert_eq!(WalkProgress::new().files_per_second(), 0.0);
    }

    #[test]
    fn test_ticker_interval() {
        let (tx, mut rx) = broadcast::channel(16);
        let ticker = ProgressTicker::new(&tx, 2, Instant::now());
        let counters = TraversalResult {
            file_count: 2,
            ..Default::default()
        };

        ticker.tick(1, || counters);
        ticker.tick(2, || counters);
        ticker.finish(&counters);

        let first = rx.try_recv().unwrap();
        assert_eq!(first.files_scanned, 2);
        assert!(!first.finished);
        assert!(rx.try_recv().unwrap().finished);
        assert!(rx.try_recv().is_err());
    }
}
