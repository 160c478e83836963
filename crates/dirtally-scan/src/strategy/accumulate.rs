//! Accumulate-in-place traversal.

use std::path::Path;

use dirtally_core::{Schedule, StrategyKind};
use rayon::prelude::*;

use super::{Discovery, TraversalStrategy};
use crate::context::WalkContext;

/// Aggregates files while walking, without any global collection.
///
/// Peak memory is the listings of the directories currently on the stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccumulateInPlace;

impl AccumulateInPlace {
    fn visit(&self, dir: &Path, cx: &WalkContext<'_>, schedule: Schedule) -> Discovery {
        let Some(subdirs) = cx.subdirectories(dir) else {
            return Discovery::default();
        };
        cx.enter_folder();

        let files = cx.files(dir);
        let here = Discovery {
            dirs: 1,
            files: files.len() as u64,
        };

        match schedule {
            Schedule::Sequential => {
                for file in &files {
                    cx.record_file(file);
                }
                subdirs
                    .iter()
                    .map(|sub| self.visit(sub, cx, schedule))
                    .fold(here, Discovery::merge)
            }
            Schedule::Parallel => {
                // Join point: this directory is done only when both halves are
                let ((), below) = rayon::join(
                    || files.par_iter().for_each(|file| cx.record_file(file)),
                    || {
                        subdirs
                            .par_iter()
                            .map(|sub| self.visit(sub, cx, schedule))
                            .reduce(Discovery::default, Discovery::merge)
                    },
                );
                here.merge(below)
            }
        }
    }
}

impl TraversalStrategy for AccumulateInPlace {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Accumulate
    }

    fn traverse(&self, root: &Path, cx: &WalkContext<'_>, schedule: Schedule) -> Discovery {
        self.visit(root, cx, schedule)
    }
}
