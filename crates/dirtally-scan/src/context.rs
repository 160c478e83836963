//! Shared state of a single run, and the failure containment boundary.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use dirtally_core::{AccessError, AggregationState, WalkWarning, is_image};

use crate::accessor::PathAccessor;
use crate::progress::ProgressTicker;

/// Everything a strategy needs while walking, shared by reference across
/// every unit of work of one run.
///
/// Accessor failures stop here: a failed listing becomes an empty one, a
/// failed length becomes zero, and a warning is recorded if enabled.
pub struct WalkContext<'a> {
    accessor: &'a dyn PathAccessor,
    state: &'a AggregationState,
    warnings: WarningSink,
    progress: ProgressTicker<'a>,
}

impl<'a> WalkContext<'a> {
    pub(crate) fn new(
        accessor: &'a dyn PathAccessor,
        state: &'a AggregationState,
        warnings_enabled: bool,
        progress: ProgressTicker<'a>,
    ) -> Self {
        Self {
            accessor,
            state,
            warnings: WarningSink::new(warnings_enabled),
            progress,
        }
    }

    /// Subdirectories of `dir`, or `None` if `dir` cannot be listed.
    ///
    /// A directory only counts as visited when this succeeds.
    pub fn subdirectories(&self, dir: &Path) -> Option<Vec<PathBuf>> {
        match self.accessor.list_subdirectories(dir) {
            Ok(dirs) => Some(dirs),
            Err(err) => {
                self.warnings.contain(&err);
                None
            }
        }
    }

    /// Files of `dir`; empty if `dir` cannot be listed.
    pub fn files(&self, dir: &Path) -> Vec<PathBuf> {
        self.accessor.list_files(dir).unwrap_or_else(|err| {
            self.warnings.contain(&err);
            Vec::new()
        })
    }

    /// Count one visited directory.
    pub fn enter_folder(&self) {
        self.state.increment_folders();
    }

    /// Measure, classify and count one file.
    ///
    /// A file whose length cannot be read still counts, with zero bytes.
    pub fn record_file(&self, path: &Path) {
        let len = self.accessor.file_length(path).unwrap_or_else(|err| {
            self.warnings.contain(&err);
            0
        });

        self.state.add_bytes(len);
        if is_image(path) {
            self.state.add_image_bytes(len);
            self.state.increment_images();
        }
        let before = self.state.increment_files();

        self.progress.tick(before + 1, || self.state.snapshot());
    }

    pub(crate) fn finish(self) -> Vec<WalkWarning> {
        self.progress.finish(&self.state.snapshot());
        self.warnings.into_inner()
    }
}

/// Collects contained failures when warnings are enabled.
struct WarningSink {
    enabled: bool,
    warnings: Mutex<Vec<WalkWarning>>,
}

impl WarningSink {
    fn new(enabled: bool) -> Self {
        Self {
            enabled,
            warnings: Mutex::new(Vec::new()),
        }
    }

    fn contain(&self, err: &AccessError) {
        if !self.enabled {
            return;
        }
        let warning = WalkWarning::from(err);
        tracing::warn!(path = %warning.path.display(), kind = %warning.kind, "{}", warning.message);
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(warning);
    }

    fn into_inner(self) -> Vec<WalkWarning> {
        self.warnings
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
