//! Size grouping and duplicate group types.
//!
//! # Overview
//!
//! Size grouping is Phase 1 of duplicate detection: files are bucketed
//! by exact byte length, since files of different lengths cannot be
//! duplicates. Only buckets with 2+ members survive to the hashing
//! phase, and the zero-length bucket is dropped regardless of the skip
//! threshold.
//!
//! # Example
//!
//! ```
//! use dupescan::scanner::FileEntry;
//! use dupescan::duplicates::group_by_size;
//! use std::path::PathBuf;
//!
//! let files = vec![
//!     FileEntry::new(PathBuf::from("/file1.txt"), 1024),
//!     FileEntry::new(PathBuf::from("/file2.txt"), 1024),
//!     FileEntry::new(PathBuf::from("/file3.txt"), 2048),
//! ];
//!
//! let (groups, stats) = group_by_size(files);
//!
//! assert_eq!(stats.total_files, 3);
//! assert_eq!(stats.potential_duplicates, 2);
//! assert_eq!(groups.len(), 1);
//! ```

use std::collections::HashMap;

use crate::scanner::{Digest, FileEntry};

/// A confirmed set of duplicate files.
///
/// Every member has identical byte length and identical content digest.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// BLAKE3 digest shared by all members
    pub digest: Digest,
    /// Byte length shared by all members
    pub size: u64,
    /// The duplicate files, in walk order
    pub files: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(digest: Digest, size: u64, files: Vec<FileEntry>) -> Self {
        Self { digest, size, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Space reclaimable by keeping one copy (all copies minus one).
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * (self.files.len() as u64).saturating_sub(1)
    }

    /// Digest as a hexadecimal string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        crate::scanner::hash_to_hex(&self.digest)
    }

    /// Just the member paths, in walk order.
    #[must_use]
    pub fn paths(&self) -> Vec<std::path::PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Statistics from the size grouping phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of files processed
    pub total_files: usize,
    /// Total size of all files in bytes
    pub total_size: u64,
    /// Number of distinct file sizes seen
    pub unique_sizes: usize,
    /// Number of files remaining in buckets of 2+ members
    pub potential_duplicates: usize,
    /// Number of files eliminated as unique (singleton buckets)
    pub eliminated_unique: usize,
    /// Number of zero-length files dropped
    pub empty_files: usize,
    /// Number of size buckets with 2+ files
    pub candidate_buckets: usize,
}

impl GroupingStats {
    /// Percentage of files eliminated by size grouping.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Group files by size (Phase 1 of duplicate detection).
///
/// Buckets every file by its exact byte length and drops the buckets
/// that cannot contain duplicates: singletons, and the length-0 bucket
/// (the threshold normally excludes empty files already; this guards
/// the invariant when the threshold is 0).
///
/// # Returns
///
/// A tuple of:
/// - `HashMap<u64, Vec<FileEntry>>` - surviving buckets keyed by size
/// - [`GroupingStats`] - counts describing the filtering
///
/// # Performance
///
/// O(n) time and space; no file I/O is performed.
#[must_use]
pub fn group_by_size(
    files: impl IntoIterator<Item = FileEntry>,
) -> (HashMap<u64, Vec<FileEntry>>, GroupingStats) {
    let mut buckets: HashMap<u64, Vec<FileEntry>> = HashMap::new();
    let mut stats = GroupingStats::default();

    for file in files {
        stats.total_files += 1;
        stats.total_size += file.size;

        if file.size == 0 {
            stats.empty_files += 1;
            log::debug!("Dropping zero-length file: {}", file.path.display());
            continue;
        }

        buckets.entry(file.size).or_default().push(file);
    }

    stats.unique_sizes = buckets.len();

    let filtered: HashMap<u64, Vec<FileEntry>> = buckets
        .into_iter()
        .filter(|(size, members)| {
            if members.len() < 2 {
                stats.eliminated_unique += members.len();
                log::trace!(
                    "Eliminated unique size {}: {}",
                    size,
                    members[0].path.display()
                );
                false
            } else {
                stats.potential_duplicates += members.len();
                stats.candidate_buckets += 1;
                log::debug!(
                    "Size bucket {} bytes: {} potential duplicates",
                    size,
                    members.len()
                );
                true
            }
        })
        .collect();

    (filtered, stats)
}
