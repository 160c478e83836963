//! Core types for dirtally.
//!
//! This crate provides the building blocks shared by the traversal engine
//! and the command line runner: walk configuration, error and warning types,
//! the image classifier, and the atomic aggregation counters.

mod classify;
mod config;
mod error;
mod mode;
mod stats;

pub use classify::{IMAGE_EXTENSIONS, is_image};
pub use config::{WalkConfig, WalkConfigBuilder};
pub use error::{AccessError, WalkError, WalkWarning, WarningKind};
pub use mode::{Schedule, StrategyKind};
pub use stats::{AggregationState, TraversalResult};
