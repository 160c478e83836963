//! dirtally - a concurrent directory size and image indexer.
//!
//! Usage:
//!   dirtally PATH                         Parallel then sequential run
//!   dirtally PATH --mode parallel         One parallel run
//!   dirtally PATH --strategy both -w      Every strategy, with warnings
//!   dirtally --help                       Show help

use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use serde::Serialize;
use strum::IntoEnumIterator;
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use dirtally_scan::{
    AggregationState, Indexer, Schedule, StrategyKind, TraversalResult, WalkConfig, WalkProgress,
    WalkReport,
};

#[derive(Parser)]
#[command(
    name = "dirtally",
    version,
    about = "Count folders, files, bytes and images under a directory",
    long_about = "dirtally walks a directory tree and reports folder, file and byte totals, \
                  plus how many of the files are images.\n\n\
                  Runs can be sequential, parallel or both, and use either the \
                  collect-then-aggregate or the accumulate-in-place strategy."
)]
struct Cli {
    /// Directory to index
    #[arg(value_parser = existing_dir)]
    path: PathBuf,

    /// Which schedules to run
    #[arg(short, long, value_enum, default_value_t = Mode::Both)]
    mode: Mode,

    /// Which traversal strategies to run
    #[arg(short, long, value_enum, default_value_t = StrategyChoice::Accumulate)]
    strategy: StrategyChoice,

    /// Report unreadable directories and vanished files
    #[arg(short, long)]
    warnings: bool,

    /// Worker threads for parallel runs (0 = one per CPU)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Include hidden files and directories
    #[arg(long)]
    hidden: bool,

    /// Show live progress on stderr
    #[arg(long)]
    progress: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Sequential,
    Parallel,
    Both,
}

impl Mode {
    fn schedules(self) -> Vec<Schedule> {
        match self {
            Self::Sequential => vec![Schedule::Sequential],
            Self::Parallel => vec![Schedule::Parallel],
            Self::Both => Schedule::iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyChoice {
    Collect,
    Accumulate,
    Both,
}

impl StrategyChoice {
    fn strategies(self) -> Vec<StrategyKind> {
        match self {
            Self::Collect => vec![StrategyKind::Collect],
            Self::Accumulate => vec![StrategyKind::Accumulate],
            Self::Both => StrategyKind::iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One run, as printed in JSON output.
#[derive(Serialize)]
struct RunSummary {
    strategy: StrategyKind,
    schedule: Schedule,
    elapsed_ms: u128,
    result: TraversalResult,
    warnings: usize,
}

impl From<&WalkReport> for RunSummary {
    fn from(report: &WalkReport) -> Self {
        Self {
            strategy: report.strategy,
            schedule: report.schedule,
            elapsed_ms: report.elapsed.as_millis(),
            result: report.result,
            warnings: report.warnings.len(),
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = WalkConfig::builder()
        .root(cli.path.clone())
        .threads(cli.threads)
        .warnings(cli.warnings)
        .include_hidden(cli.hidden)
        .build()
        .context("Invalid configuration")?;
    let indexer = Indexer::new(config).context("Cannot index path")?;

    let workers = indexer.worker_count();
    let printer = cli
        .progress
        .then(|| spawn_progress_printer(indexer.subscribe(), std::io::stderr()));

    let mut state = AggregationState::new();
    let mut reports = Vec::new();
    for strategy in cli.strategy.strategies() {
        for schedule in cli.mode.schedules() {
            state.reset();
            // The progress printer owns stderr while runs are in flight
            if printer.is_none() && matches!(cli.format, OutputFormat::Text) {
                eprintln!("Indexing {} ({strategy}, {schedule})...", cli.path.display());
            }
            reports.push(indexer.run(strategy, schedule, &state));
        }
    }

    // Dropping the indexer closes the progress channel, so the printer
    // drains the last events and exits.
    drop(indexer);
    if let Some(printer) = printer {
        let _ = printer.join();
    }

    match cli.format {
        OutputFormat::Text => {
            for report in &reports {
                print_report(report, &cli.path, workers);
            }
        }
        OutputFormat::Json => {
            let summaries: Vec<RunSummary> = reports.iter().map(RunSummary::from).collect();
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
    }

    Ok(())
}

/// Accept only paths that name an existing directory.
fn existing_dir(s: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if !path.exists() {
        return Err(format!("path does not exist: {s}"));
    }
    if !path.is_dir() {
        return Err(format!("not a directory: {s}"));
    }
    Ok(path)
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "dirtally=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Print progress events to `out` on a background thread until the channel
/// closes. The thread hands `out` back when it exits.
fn spawn_progress_printer<W>(mut rx: Receiver<WalkProgress>, mut out: W) -> JoinHandle<W>
where
    W: Write + Send + 'static,
{
    std::thread::spawn(move || {
        loop {
            match rx.blocking_recv() {
                Ok(progress) => {
                    if print_progress(&mut out, &progress).is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
        out
    })
}

fn print_progress(out: &mut impl Write, progress: &WalkProgress) -> std::io::Result<()> {
    write!(
        out,
        "\r {} folders, {} files, {} ({:.0} files/s)",
        progress.folders_scanned,
        progress.files_scanned,
        format_size(progress.bytes_scanned),
        progress.files_per_second()
    )?;
    if progress.finished {
        writeln!(out)?;
    }
    out.flush()
}

/// Print the summary of one run.
fn print_report(report: &WalkReport, path: &Path, workers: usize) {
    let result = &report.result;
    let label = match report.schedule {
        Schedule::Parallel => format!("{}, parallel on {workers} workers", report.strategy),
        Schedule::Sequential => format!("{}, sequential", report.strategy),
    };

    println!();
    println!("{}", "─".repeat(60));
    println!(" {} ({label})", path.display());
    println!(" Finished in {}", format_elapsed(report.elapsed));
    println!("{}", "─".repeat(60));
    println!(" Folders: {:>12}", result.folder_count);
    println!(" Files:   {:>12}", result.file_count);
    println!(
        " Size:    {:>12} ({} bytes)",
        format_size(result.total_bytes),
        result.total_bytes
    );

    if result.has_images() {
        println!(" Images:  {:>12}", result.image_count);
        println!(
            " Image size: {:>9} ({} bytes)",
            format_size(result.image_bytes),
            result.image_bytes
        );
    } else {
        println!(" No images found.");
    }

    if !report.warnings.is_empty() {
        println!();
        println!(" {} warning(s) during run", report.warnings.len());
    }
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

fn format_elapsed(elapsed: Duration) -> String {
    if elapsed.as_secs() >= 1 {
        format!("{:.2}s", elapsed.as_secs_f64())
    } else {
        format!("{}ms", elapsed.as_millis())
    }
}
