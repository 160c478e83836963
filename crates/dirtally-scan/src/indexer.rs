//! Run orchestration: one entry point for every strategy and schedule.

use std::path::Path;
use std::time::{Duration, Instant};

use dirtally_core::{
    AggregationState, Schedule, StrategyKind, TraversalResult, WalkConfig, WalkError, WalkWarning,
};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tokio::sync::broadcast;

use crate::accessor::{LocalFs, PathAccessor};
use crate::context::WalkContext;
use crate::progress::{ProgressTicker, WalkProgress};
use crate::strategy::strategy_for;

/// Stack size of each walk worker. Traversal recurses once per directory
/// level, and unoptimized builds need several KiB per level.
const WORKER_STACK_SIZE: usize = 64 * 1024 * 1024;

/// Outcome of one indexing run.
#[derive(Debug, Clone)]
pub struct WalkReport {
    /// Strategy the run used.
    pub strategy: StrategyKind,
    /// Schedule the run used.
    pub schedule: Schedule,
    /// Final counters plus discovery counts.
    pub result: TraversalResult,
    /// Contained failures, empty unless warnings were enabled.
    pub warnings: Vec<WalkWarning>,
    /// Wall time of the run.
    pub elapsed: Duration,
}

/// Indexes a directory tree with a selectable strategy and schedule.
///
/// Runs execute on a dedicated worker pool sized from
/// [`WalkConfig::threads`]. Sequential runs use a single worker of that pool
/// and never fan out, so both schedules get the same stack depth.
pub struct Indexer<A: PathAccessor = LocalFs> {
    config: WalkConfig,
    accessor: A,
    pool: ThreadPool,
    progress_tx: broadcast::Sender<WalkProgress>,
}

impl Indexer<LocalFs> {
    /// Create an indexer over the local filesystem.
    ///
    /// Fails if the configured root is missing or not a directory.
    pub fn new(config: WalkConfig) -> Result<Self, WalkError> {
        validate_root(&config.root)?;
        let accessor = LocalFs::from_config(&config);
        Self::with_accessor(config, accessor)
    }
}

impl<A: PathAccessor> Indexer<A> {
    /// Create an indexer over any accessor. The root is not checked.
    pub fn with_accessor(config: WalkConfig, accessor: A) -> Result<Self, WalkError> {
        if config.progress_interval == 0 {
            return Err(WalkError::InvalidConfig {
                message: "progress interval must be greater than zero".to_string(),
            });
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("dirtally-walk-{i}"))
            .stack_size(WORKER_STACK_SIZE)
            .build()
            .map_err(|e| WalkError::ThreadPool {
                message: e.to_string(),
            })?;
        let (progress_tx, _) = broadcast::channel(100);

        Ok(Self {
            config,
            accessor,
            pool,
            progress_tx,
        })
    }

    /// Subscribe to progress updates of subsequent runs.
    pub fn subscribe(&self) -> broadcast::Receiver<WalkProgress> {
        self.progress_tx.subscribe()
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Number of workers parallel runs use.
    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Walk the configured root once, accumulating into `state`.
    ///
    /// Contained filesystem failures under-count the tree but never abort
    /// the run. `state` should be zero on entry; the report's counters are
    /// read from it after every unit of work has been joined.
    pub fn run(
        &self,
        strategy: StrategyKind,
        schedule: Schedule,
        state: &AggregationState,
    ) -> WalkReport {
        let start = Instant::now();
        let root = self.config.root.as_path();
        tracing::debug!(root = %root.display(), %strategy, %schedule, "starting run");

        let cx = WalkContext::new(
            &self.accessor,
            state,
            self.config.warnings,
            ProgressTicker::new(&self.progress_tx, self.config.progress_interval, start),
        );
        let algorithm = strategy_for(strategy);

        let discovery = self
            .pool
            .install(|| algorithm.traverse(root, &cx, schedule));

        let warnings = cx.finish();
        let result = TraversalResult {
            dirs_discovered: discovery.dirs,
            files_discovered: discovery.files,
            ..state.snapshot()
        };
        let elapsed = start.elapsed();

        tracing::debug!(
            %strategy,
            %schedule,
            folders = result.folder_count,
            files = result.file_count,
            bytes = result.total_bytes,
            warnings = warnings.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "run finished"
        );

        WalkReport {
            strategy,
            schedule,
            result,
            warnings,
            elapsed,
        }
    }
}

fn validate_root(root: &Path) -> Result<(), WalkError> {
    if !root.exists() {
        return Err(WalkError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}
