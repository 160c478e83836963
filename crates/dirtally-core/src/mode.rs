//! Traversal strategy and scheduling selectors.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Which traversal algorithm a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Gather every directory and file first, then aggregate in one flat pass.
    Collect,
    /// Aggregate each file as soon as its directory is visited.
    Accumulate,
}

/// How a strategy schedules its units of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Schedule {
    /// Fork-join across the worker pool.
    Parallel,
    /// Depth-first on the calling thread.
    Sequential,
}

impl Schedule {
    /// Whether this schedule fans out onto the worker pool.
    pub fn is_parallel(self) -> bool {
        matches!(self, Self::Parallel)
    }
}
