//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Depth-first directory walking with deterministic ordering
//! - Exclusion filtering (shell-style globs, size threshold)
//! - Streaming content hashing with BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal, filtering, and file discovery
//! - [`hasher`]: BLAKE3 file hashing (streaming, 1 MiB chunks)
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::default().with_skip_threshold(1);
//! let walker = Walker::new(Path::new("."), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

pub use hasher::{hash_to_hex, Digest, Hasher, CHUNK_SIZE};
pub use walker::Walker;

/// A discovered candidate file.
///
/// Holds the path and the byte length measured at stat time. The size may
/// be stale if the file changes concurrently; a later hashing failure is
/// handled as a per-file skip rather than guarded against here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes, as measured during traversal
    pub size: u64,
}

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Configuration for directory walking and candidate filtering.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Files with `size <= skip_threshold` are excluded. The default of 1
    /// excludes empty and one-byte files; a threshold of 0 still excludes
    /// zero-length files.
    pub skip_threshold: u64,

    /// Shell-style exclusion patterns matched against the full path
    /// string (not just the file name).
    pub exclude: Vec<glob::Pattern>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            skip_threshold: 1,
            exclude: Vec::new(),
        }
    }
}

impl WalkerConfig {
    /// Set the skip threshold in bytes.
    #[must_use]
    pub fn with_skip_threshold(mut self, threshold: u64) -> Self {
        self.skip_threshold = threshold;
        self
    }

    /// Set the exclusion patterns.
    #[must_use]
    pub fn with_exclude(mut self, patterns: Vec<glob::Pattern>) -> Self {
        self.exclude = patterns;
        self
    }
}

/// Errors that can occur during directory traversal.
///
/// These are fatal for the scan: they concern the root path or the
/// structure of the walk, not an individual candidate file.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified root path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified root path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A directory could not be listed during traversal.
    #[error("Cannot read directory {path}: {source}")]
    DirUnreadable {
        /// Directory that failed to list
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while reading an individual file.
///
/// These are recoverable: the offending file is skipped with a
/// diagnostic and the scan continues. Anything outside this taxonomy is
/// not absorbed.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file vanished between discovery and hashing.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Hashing was aborted by the shutdown flag.
    #[error("Hashing interrupted")]
    Interrupted,
}

impl HashError {
    /// Map an I/O error for `path` onto the expected taxonomy.
    pub(crate) fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_new() {
        let entry = FileEntry::new(PathBuf::from("/test/file.txt"), 1024);
        assert_eq!(entry.path, PathBuf::from("/test/file.txt"));
        assert_eq!(entry.size, 1024);
    }

    #[test]
    fn test_walker_config_default() {
        let config = WalkerConfig::default();
        assert_eq!(config.skip_threshold, 1);
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_walker_config_builders() {
        let config = WalkerConfig::default()
            .with_skip_threshold(100)
            .with_exclude(vec![glob::Pattern::new("*.tmp").unwrap()]);
        assert_eq!(config.skip_threshold, 100);
        assert_eq!(config.exclude.len(), 1);
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::NotFound(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "Path not found: /missing");

        let err = ScanError::NotADirectory(PathBuf::from("/file.txt"));
        assert_eq!(err.to_string(), "Not a directory: /file.txt");
    }

    #[test]
    fn test_hash_error_display() {
        let err = HashError::NotFound(PathBuf::from("/test"));
        assert_eq!(err.to_string(), "File not found: /test");

        let err = HashError::PermissionDenied(PathBuf::from("/secret"));
        assert_eq!(err.to_string(), "Permission denied: /secret");
    }

    #[test]
    fn test_hash_error_from_io_kinds() {
        let path = std::path::Path::new("/x");
        let err = HashError::from_io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, HashError::NotFound(_)));

        let err = HashError::from_io(
            path,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, HashError::PermissionDenied(_)));

        let err = HashError::from_io(
            path,
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof"),
        );
        assert!(matches!(err, HashError::Io { .. }));
    }
}
