//! Directory walker for candidate file discovery.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree depth-first and yielding the regular files that pass the
//! exclusion filters. Traversal uses [`walkdir`] with children sorted by
//! file name, so the yielded order is deterministic across runs.
//!
//! Symbolic links are neither followed nor reported.
//!
//! # Error policy
//!
//! A directory that cannot be listed yields a [`ScanError`] item, which
//! callers treat as fatal for the scan. A single file whose metadata
//! cannot be read (vanished, permission denied) is skipped with a
//! warning naming the file, and traversal continues.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::default()
//!     .with_exclude(vec![glob::Pattern::new("*.log").unwrap()]);
//! let walker = Walker::new(Path::new("/home/user/Downloads"), config);
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("Found {} candidates", files.len());
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{FileEntry, ScanError, WalkerConfig};

/// Depth-first directory walker producing filtered candidate files.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a new walker for the given root directory.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set to `true`, the walker stops iteration as
    /// soon as possible.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Check if a path matches any exclusion pattern.
    ///
    /// Patterns are matched against the full path string, not just the
    /// file name.
    fn is_excluded(&self, path: &Path) -> bool {
        if self.config.exclude.is_empty() {
            return false;
        }
        let path_str = path.to_string_lossy();
        self.config.exclude.iter().any(|p| p.matches(&path_str))
    }

    /// Walk the tree, yielding candidate files lazily.
    ///
    /// Returns a single-pass iterator over [`FileEntry`] results. The
    /// sequence is finite and not restartable; a fresh call re-walks.
    /// `Err` items are directory-level traversal failures.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let walk_dir = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();

        walk_dir.into_iter().filter_map(move |entry_result| {
            if self.is_shutdown_requested() {
                log::debug!("Walker: shutdown requested, stopping iteration");
                return None;
            }

            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("traversal loop"));
                    return Some(Err(ScanError::DirUnreadable { path, source }));
                }
            };

            let file_type = entry.file_type();

            // Symlinks are neither followed nor reported
            if file_type.is_symlink() {
                log::trace!("Skipping symlink: {}", entry.path().display());
                return None;
            }

            if !file_type.is_file() {
                return None;
            }

            if self.is_excluded(entry.path()) {
                log::trace!("Excluded by pattern: {}", entry.path().display());
                return None;
            }

            // Stat failures on one file must not kill the run: skip with
            // a diagnostic and keep walking.
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    log::warn!("Skipping {}: cannot stat: {}", entry.path().display(), e);
                    return None;
                }
            };

            let size = metadata.len();

            // "<=" boundary: a file of exactly skip_threshold bytes is
            // excluded, threshold + 1 is included.
            if size <= self.config.skip_threshold {
                log::trace!(
                    "Skipping {} ({} bytes <= threshold {})",
                    entry.path().display(),
                    size,
                    self.config.skip_threshold
                );
                return None;
            }

            Some(Ok(FileEntry::new(entry.into_path(), size)))
        })
    }
}
