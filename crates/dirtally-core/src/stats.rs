//! Aggregation counters and run results.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Totals produced by an indexing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalResult {
    /// Total size in bytes of every counted file.
    pub total_bytes: u64,
    /// Number of files counted.
    pub file_count: u64,
    /// Number of directories visited, root included.
    pub folder_count: u64,
    /// Total size in bytes of image files.
    pub image_bytes: u64,
    /// Number of image files.
    pub image_count: u64,
    /// Directories the strategy discovered.
    pub dirs_discovered: u64,
    /// Files the strategy discovered.
    pub files_discovered: u64,
}

impl TraversalResult {
    /// Check if any image was counted.
    pub fn has_images(&self) -> bool {
        self.image_count > 0
    }
}

/// Counters shared by every unit of work in a run.
///
/// All mutation goes through atomic add/increment so concurrent branches
/// never lose an update. [`reset`](Self::reset) takes `&mut self`, so it
/// cannot overlap a run that still borrows the state.
#[derive(Debug, Default)]
pub struct AggregationState {
    total_bytes: AtomicU64,
    file_count: AtomicU64,
    folder_count: AtomicU64,
    image_bytes: AtomicU64,
    image_count: AtomicU64,
}

impl AggregationState {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bytes(&self, n: u64) {
        self.total_bytes.fetch_add(n, Ordering::Relaxed);
    }

    /// Count one file. Returns the number of files counted before this one.
    pub fn increment_files(&self) -> u64 {
        self.file_count.fetch_add(1, Ordering::Relaxed)
    }

    pub fn add_image_bytes(&self, n: u64) {
        self.image_bytes.fetch_add(n, Ordering::Relaxed);
    }

    pub fn increment_images(&self) {
        self.image_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_folders(&self) {
        self.folder_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        *self.total_bytes.get_mut() = 0;
        *self.file_count.get_mut() = 0;
        *self.folder_count.get_mut() = 0;
        *self.image_bytes.get_mut() = 0;
        *self.image_count.get_mut() = 0;
    }

    /// Current counter values. Discovery counts are left at zero.
    pub fn snapshot(&self) -> TraversalResult {
        TraversalResult {
            total_bytes: self.total_bytes.load(Ordering::Relaxed),
            file_count: self.file_count.load(Ordering::Relaxed),
            folder_count: self.folder_count.load(Ordering::Relaxed),
            image_bytes: self.image_bytes.load(Ordering::Relaxed),
            image_count: self.image_count.load(Ordering::Relaxed),
            dirs_discovered: 0,
            files_discovered: 0,
        }
    }
}
