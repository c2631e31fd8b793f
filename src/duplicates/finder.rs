//! Duplicate finder pipeline orchestration.
//!
//! # Overview
//!
//! This module runs the two-phase detection pipeline:
//! 1. **Phase 1 - Size grouping**: bucket candidates by byte length
//!    (see [`crate::duplicates::groups`])
//! 2. **Phase 2 - Hash confirmation**: stream-hash every member of each
//!    qualifying bucket and group by digest
//!
//! Buckets are processed in ascending size order, and files within a
//! bucket are hashed on a bounded worker pool with results collected in
//! walk order, so output is deterministic and reproducible across runs.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(4));
//! let (groups, summary) = finder.find_duplicates(Path::new("/some/path")).unwrap();
//! println!("{} duplicate groups, {} reclaimable", groups.len(), summary.reclaimable_display());
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::output::ProgressCallback;
use crate::scanner::{Digest, FileEntry, HashError, Hasher, ScanError, WalkerConfig};

use super::{group_by_size, DuplicateGroup};

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Number of worker threads for parallel hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Walker configuration for traversal and filtering.
    pub walker_config: WalkerConfig,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field("walker_config", &self.walker_config)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            walker_config: WalkerConfig::default(),
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Create a new configuration with custom worker thread count.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Total number of candidate files that passed filtering
    pub total_files: usize,
    /// Total size of all candidates in bytes
    pub total_size: u64,
    /// Number of files eliminated by size grouping
    pub eliminated_by_size: usize,
    /// Number of files successfully hashed
    pub hashed_files: usize,
    /// Number of files skipped due to read errors
    pub failed_files: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding one original per group)
    pub duplicate_files: usize,
    /// Space reclaimable by keeping one copy per group
    pub reclaimable_space: u64,
    /// Duration of the scan
    pub scan_duration: std::time::Duration,
}

impl ScanSummary {
    /// Format reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        format_size(self.reclaimable_space)
    }
}

/// Format a byte size as a human-readable string.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The scan was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A traversal error occurred. These are fatal for the run.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Duplicate finder that orchestrates the two-phase pipeline.
///
/// 1. **Walk** - enumerate and filter candidates under the root
/// 2. **Phase 1** - group by size, dropping buckets that cannot hold
///    duplicates
/// 3. **Phase 2** - hash-confirm each bucket in ascending size order
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Arc<Hasher>,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let mut hasher = Hasher::new();
        if let Some(ref flag) = config.shutdown_flag {
            hasher = hasher.with_shutdown_flag(flag.clone());
        }
        Self {
            config,
            hasher: Arc::new(hasher),
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all duplicate files under the given root directory.
    ///
    /// Runs the complete pipeline and returns confirmed groups along
    /// with summary statistics. Groups are emitted bucket by bucket in
    /// ascending size order; within a bucket, in the order their digest
    /// was first encountered.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if the root does not exist or is not a
    /// directory, if a directory cannot be listed during traversal, or
    /// if the scan is interrupted. Per-file read failures do not error;
    /// the file is skipped with a diagnostic.
    pub fn find_duplicates(
        &self,
        path: &std::path::Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FinderError::NotADirectory(path.to_path_buf()));
        }

        log::info!("Starting duplicate scan of {}", path.display());

        let mut walker = crate::scanner::Walker::new(path, self.config.walker_config.clone());
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(flag.clone());
        }

        // Traversal errors abort the run; the walker has already skipped
        // (and logged) unreadable individual files.
        let files = walker.walk().collect::<Result<Vec<_>, _>>()?;

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        self.confirm_duplicates(files)
    }

    /// Run the grouping phases over an already-collected candidate list.
    ///
    /// Useful when candidates come from another source than the walker.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Interrupted`] if the shutdown flag is
    /// raised between buckets or mid-file.
    pub fn confirm_duplicates(
        &self,
        files: Vec<FileEntry>,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = std::time::Instant::now();
        let mut summary = ScanSummary {
            total_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
            ..Default::default()
        };

        log::info!(
            "Found {} candidate files ({})",
            summary.total_files,
            format_size(summary.total_size)
        );

        // Phase 1: group by size
        let (mut buckets, stats) = group_by_size(files);
        summary.eliminated_by_size = stats.eliminated_unique + stats.empty_files;

        log::info!(
            "Phase 1 complete: {} files in {} candidate buckets ({:.1}% eliminated)",
            stats.potential_duplicates,
            stats.candidate_buckets,
            stats.elimination_rate()
        );

        // Ascending size order is part of the output contract.
        let mut sizes: Vec<u64> = buckets.keys().copied().collect();
        sizes.sort_unstable();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()
            .unwrap_or_else(|_| {
                log::warn!(
                    "Failed to create custom thread pool, using global pool with {} threads",
                    rayon::current_num_threads()
                );
                rayon::ThreadPoolBuilder::new().build().unwrap()
            });

        // Phase 2: hash-confirm each bucket
        let mut all_groups = Vec::new();
        for size in sizes {
            if self.config.is_shutdown_requested() {
                return Err(FinderError::Interrupted);
            }

            let members = buckets.remove(&size).unwrap_or_default();

            if let Some(ref callback) = self.config.progress_callback {
                callback.on_bucket_start(size, members.len());
            }
            log::debug!("Hashing {} files of {} bytes", members.len(), size);

            let hasher = Arc::clone(&self.hasher);
            let results: Vec<(FileEntry, Result<Digest, HashError>)> = pool.install(|| {
                members
                    .into_par_iter()
                    .map(|file| {
                        let digest = hasher.hash_file(&file.path);
                        (file, digest)
                    })
                    .collect()
            });

            for group in self.group_bucket(size, results, &mut summary)? {
                if let Some(ref callback) = self.config.progress_callback {
                    callback.on_group_found(&group);
                }
                summary.duplicate_groups += 1;
                summary.duplicate_files += group.len() - 1;
                summary.reclaimable_space += group.wasted_space();
                all_groups.push(group);
            }
        }

        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} duplicate groups, {} duplicate files, {} reclaimable",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display()
        );

        Ok((all_groups, summary))
    }

    /// Group one bucket's hash results by digest, in first-seen order.
    ///
    /// Read failures skip the file with a diagnostic; only groups with
    /// 2+ members are returned.
    fn group_bucket(
        &self,
        size: u64,
        results: Vec<(FileEntry, Result<Digest, HashError>)>,
        summary: &mut ScanSummary,
    ) -> Result<Vec<DuplicateGroup>, FinderError> {
        let mut order: Vec<Digest> = Vec::new();
        let mut by_digest: HashMap<Digest, Vec<FileEntry>> = HashMap::new();

        for (file, result) in results {
            match result {
                Ok(digest) => {
                    summary.hashed_files += 1;
                    by_digest
                        .entry(digest)
                        .or_insert_with(|| {
                            order.push(digest);
                            Vec::new()
                        })
                        .push(file);
                }
                Err(HashError::Interrupted) => {
                    return Err(FinderError::Interrupted);
                }
                Err(e) => {
                    summary.failed_files += 1;
                    log::warn!("Skipping {}: {}", file.path.display(), e);
                }
            }
        }

        Ok(order
            .into_iter()
            .filter_map(|digest| {
                let members = by_digest.remove(&digest)?;
                (members.len() > 1).then(|| DuplicateGroup::new(digest, size, members))
            })
            .collect())
    }
}
