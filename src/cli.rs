//! Command-line interface definitions.
//!
//! This module defines the CLI surface using the clap derive API. The
//! tool is a single flat command; exclusion patterns are validated at
//! parse time so a malformed glob is rejected before any scanning
//! begins.
//!
//! # Example
//!
//! ```bash
//! # Scan the current directory
//! dupescan
//!
//! # Scan a specific tree, skipping small files and logs
//! dupescan --start-path ~/Downloads --skip-threshold 4096 --exclude "*.log"
//!
//! # Verbose mode for debugging
//! dupescan -v --start-path /data
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Duplicate file finder.
///
/// Walks a directory tree, buckets files by size, and confirms
/// duplicates by streaming BLAKE3 content hashing.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub start_path: Option<PathBuf>,

    /// Minimum file size in bytes; files at or below this size are skipped
    #[arg(long, value_name = "BYTES", default_value_t = 1)]
    pub skip_threshold: u64,

    /// Glob pattern to exclude, matched against the full path (repeatable)
    #[arg(long = "exclude", value_name = "GLOB", value_parser = parse_pattern)]
    pub exclude: Vec<glob::Pattern>,

    /// Number of worker threads for hashing
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub io_threads: usize,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Parse and validate a shell-style glob pattern.
///
/// # Errors
///
/// Returns a message describing the malformed pattern.
pub fn parse_pattern(s: &str) -> Result<glob::Pattern, String> {
    glob::Pattern::new(s).map_err(|e| format!("Invalid glob pattern '{s}': {e}"))
}
