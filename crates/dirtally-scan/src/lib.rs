//! Directory traversal engine for dirtally.
//!
//! This crate walks a directory tree and accumulates sizes, counts and
//! image statistics into an [`AggregationState`].
//!
//! # Overview
//!
//! - **Two strategies**: collect-then-aggregate and accumulate-in-place,
//!   behind the [`TraversalStrategy`] trait
//! - **Two schedules**: sequential, or fork-join on a rayon pool, with
//!   identical results on a static tree
//! - **Failure containment**: unreadable directories and vanished files
//!   contribute zero and optionally produce a [`WalkWarning`]
//! - **Progress updates** via broadcast channels
//!
//! # Example
//!
//! ```rust,no_run
//! use dirtally_scan::{AggregationState, Indexer, Schedule, StrategyKind, WalkConfig};
//!
//! let indexer = Indexer::new(WalkConfig::new("/path/to/index")).unwrap();
//! let mut state = AggregationState::new();
//!
//! let report = indexer.run(StrategyKind::Accumulate, Schedule::Parallel, &state);
//! println!("{} files, {} bytes", report.result.file_count, report.result.total_bytes);
//!
//! state.reset();
//! let report = indexer.run(StrategyKind::Collect, Schedule::Sequential, &state);
//! println!("{} images", report.result.image_count);
//! ```
//!
//! # Custom accessors
//!
//! Anything implementing [`PathAccessor`] can stand in for the local
//! filesystem through [`Indexer::with_accessor`].

mod accessor;
mod context;
mod indexer;
mod progress;
pub mod strategy;

pub use accessor::{LocalFs, PathAccessor};
pub use context::WalkContext;
pub use indexer::{Indexer, WalkReport};
pub use progress::WalkProgress;
pub use strategy::{
    AccumulateInPlace, CollectThenAggregate, Discovery, TraversalStrategy, strategy_for,
};

// Re-export core types for convenience
pub use dirtally_core::{
    AccessError, AggregationState, Schedule, StrategyKind, TraversalResult, WalkConfig,
    WalkError, WalkWarning, WarningKind, is_image,
};
