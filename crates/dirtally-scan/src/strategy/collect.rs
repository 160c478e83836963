//! Collect-then-aggregate traversal.

use std::path::{Path, PathBuf};

use dashmap::DashSet;
use dirtally_core::{Schedule, StrategyKind};
use rayon::prelude::*;

use super::{Discovery, TraversalStrategy};
use crate::context::WalkContext;

/// Materializes every directory, then every file, then aggregates.
///
/// Memory grows with tree size, but the aggregation itself is a single flat
/// pass over the file set.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectThenAggregate;

impl CollectThenAggregate {
    /// Phase 1: gather `dir` and everything below it into `seen`.
    fn collect_dirs(
        &self,
        dir: &Path,
        cx: &WalkContext<'_>,
        seen: &DashSet<PathBuf>,
        schedule: Schedule,
    ) {
        let Some(subdirs) = cx.subdirectories(dir) else {
            return;
        };
        if !seen.insert(dir.to_path_buf()) {
            return;
        }
        cx.enter_folder();

        match schedule {
            Schedule::Sequential => {
                for sub in &subdirs {
                    self.collect_dirs(sub, cx, seen, schedule);
                }
            }
            // par_iter joins every child before returning
            Schedule::Parallel => subdirs
                .par_iter()
                .for_each(|sub| self.collect_dirs(sub, cx, seen, schedule)),
        }
    }

    /// Phase 2: list the files of every collected directory into one set.
    fn collect_files(
        &self,
        dirs: &[PathBuf],
        cx: &WalkContext<'_>,
        schedule: Schedule,
    ) -> Vec<PathBuf> {
        let files = DashSet::new();
        let gather = |dir: &PathBuf| {
            for file in cx.files(dir) {
                files.insert(file);
            }
        };

        match schedule {
            Schedule::Sequential => dirs.iter().for_each(gather),
            Schedule::Parallel => dirs.par_iter().for_each(gather),
        }

        files.into_iter().collect()
    }
}

impl TraversalStrategy for CollectThenAggregate {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Collect
    }

    fn traverse(&self, root: &Path, cx: &WalkContext<'_>, schedule: Schedule) -> Discovery {
        let seen = DashSet::new();
        self.collect_dirs(root, cx, &seen, schedule);
        let dirs: Vec<PathBuf> = seen.into_iter().collect();

        let files = self.collect_files(&dirs, cx, schedule);

        // Phase 3: one flat aggregation pass
        match schedule {
            Schedule::Sequential => files.iter().for_each(|file| cx.record_file(file)),
            Schedule::Parallel => files.par_iter().for_each(|file| cx.record_file(file)),
        }

        Discovery {
            dirs: dirs.len() as u64,
            files: files.len() as u64,
        }
    }
}
