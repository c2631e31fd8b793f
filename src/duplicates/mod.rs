//! Duplicate detection: size grouping and hash confirmation.

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{group_by_size, DuplicateGroup, GroupingStats};
