//! DupeScan - duplicate file finder.
//!
//! Walks a directory tree, buckets candidate files by byte length, and
//! confirms true duplicates by streaming BLAKE3 content hashing within
//! each bucket. Reports groups of identical files as line-oriented text.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod signal;

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::cli::Cli;
use crate::duplicates::{DuplicateFinder, DuplicateGroup, FinderConfig, FinderError, ScanSummary};
use crate::error::ExitCode;
use crate::output::{ConsoleReport, ProgressCallback};
use crate::scanner::WalkerConfig;

/// Run a full scan of `root`, writing the report to `report`.
///
/// Prints the startup and threshold lines, runs the pipeline with the
/// report attached as progress callback, and prints the done line on
/// success. This is the seam `run_app` wires to stdout; tests point it
/// at a buffer.
///
/// # Errors
///
/// Returns [`FinderError`] on fatal traversal failures or interruption.
pub fn run_scan<W: Write + Send + 'static>(
    root: &Path,
    config: FinderConfig,
    report: Arc<ConsoleReport<W>>,
) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
    report.scan_started(root);
    report.announce_threshold(config.walker_config.skip_threshold);

    let callback: Arc<dyn ProgressCallback> = report.clone();
    let finder = DuplicateFinder::new(config.with_progress_callback(callback));
    let result = finder.find_duplicates(root)?;

    report.finished();
    Ok(result)
}

/// Application entry point: wire CLI arguments to the scan pipeline.
///
/// Initializes logging and the Ctrl+C handler, resolves the scan root,
/// runs the scan against stdout, and maps the outcome to an exit code.
///
/// # Errors
///
/// Returns fatal errors for the binary to report; interruption is
/// mapped to [`ExitCode::Interrupted`] rather than an error.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    let handler = signal::install_handler();

    let root = match cli.start_path {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };

    let walker_config = WalkerConfig::default()
        .with_skip_threshold(cli.skip_threshold)
        .with_exclude(cli.exclude);

    let config = FinderConfig::default()
        .with_io_threads(cli.io_threads)
        .with_walker_config(walker_config)
        .with_shutdown_flag(handler.get_flag());

    let report = Arc::new(ConsoleReport::new(std::io::stdout()));

    match run_scan(&root, config, report) {
        Ok((groups, summary)) => {
            log::debug!(
                "{} groups in {:.2?}, {} reclaimable",
                groups.len(),
                summary.scan_duration,
                summary.reclaimable_display()
            );
            Ok(ExitCode::Success)
        }
        Err(FinderError::Interrupted) => Ok(ExitCode::Interrupted),
        Err(e) => Err(e.into()),
    }
}
