//! Traversal strategies.
//!
//! Both strategies walk the same tree through the same [`WalkContext`] and
//! differ only in when aggregation happens relative to discovery:
//!
//! - [`CollectThenAggregate`] gathers every directory, then every file, and
//!   aggregates in one flat pass.
//! - [`AccumulateInPlace`] aggregates each directory's files as soon as the
//!   directory is visited.
//!
//! Each runs sequentially or as fork-join on the current rayon pool. Every
//! fan-out is joined before its parent returns.

mod accumulate;
mod collect;

use std::path::Path;

use dirtally_core::{Schedule, StrategyKind};

use crate::context::WalkContext;

pub use accumulate::AccumulateInPlace;
pub use collect::CollectThenAggregate;

/// Directories and files a strategy discovered during one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discovery {
    pub dirs: u64,
    pub files: u64,
}

impl Discovery {
    pub fn merge(self, other: Self) -> Self {
        Self {
            dirs: self.dirs + other.dirs,
            files: self.files + other.files,
        }
    }
}

/// A pluggable traversal algorithm.
pub trait TraversalStrategy: Send + Sync {
    /// Identify the strategy for logging and reports.
    fn kind(&self) -> StrategyKind;

    /// Walk the tree under `root`, applying every update through `cx`.
    fn traverse(&self, root: &Path, cx: &WalkContext<'_>, schedule: Schedule) -> Discovery;
}

/// Strategy implementation for a kind.
pub fn strategy_for(kind: StrategyKind) -> &'static dyn TraversalStrategy {
    match kind {
        StrategyKind::Collect => &CollectThenAggregate,
        StrategyKind::Accumulate => &AccumulateInPlace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_for_matches_kind() {
        for kind in [StrategyKind::Collect, StrategyKind::Accumulate] {
            assert_eq!(strategy_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_discovery_merge() {
        let a = Discovery { dirs: 1, files: 2 };
        let b = Discovery { dirs: 3, files: 4 };
        assert_eq!(a.merge(b), Discovery { dirs: 4, files: 6 });
        assert_eq!(a.merge(Discovery::default()), a);
    }
}
