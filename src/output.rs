//! Line-oriented console reporting.
//!
//! The scan output contract is a fixed sequence of stdout lines: the
//! scan root, an optional threshold announcement, a progress line per
//! qualifying size bucket, the duplicate groups as they are confirmed,
//! and a terminal done line. [`ConsoleReport`] writes those lines to any
//! [`Write`] sink, which keeps the format testable; the binary points it
//! at stdout.

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use crate::duplicates::DuplicateGroup;

/// Progress callback for the duplicate detection pipeline.
///
/// Implement this trait to observe the scan as it proceeds. Callbacks
/// fire in output order: every bucket announcement precedes the groups
/// confirmed within that bucket.
pub trait ProgressCallback: Send + Sync {
    /// Called before hashing a qualifying size bucket.
    fn on_bucket_start(&self, size: u64, files: usize);

    /// Called when a confirmed duplicate group is found.
    fn on_group_found(&self, group: &DuplicateGroup);
}

/// Console report writer producing the line-oriented scan output.
///
/// Wraps the sink in a [`Mutex`] so the hashing phase can report from
/// its worker pool context.
pub struct ConsoleReport<W> {
    out: Mutex<W>,
}

impl<W: Write + Send> ConsoleReport<W> {
    /// Create a report writing to the given sink.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Announce the scan root. First line of every run.
    pub fn scan_started(&self, root: &Path) {
        let mut out = self.out.lock().unwrap();
        let _ = writeln!(out, "{}", root.display());
    }

    /// Announce the active skip threshold. Printed only when the
    /// threshold is greater than zero.
    pub fn announce_threshold(&self, threshold: u64) {
        if threshold > 0 {
            let mut out = self.out.lock().unwrap();
            let _ = writeln!(out, "Skipping files of {} bytes and below", threshold);
        }
    }

    /// Terminal line of every successful run.
    pub fn finished(&self) {
        let mut out = self.out.lock().unwrap();
        let _ = writeln!(out, "Done.");
        let _ = out.flush();
    }

    /// Recover the underlying sink.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap()
    }
}

impl<W: Write + Send> ProgressCallback for ConsoleReport<W> {
    fn on_bucket_start(&self, size: u64, _files: usize) {
        let mut out = self.out.lock().unwrap();
        let _ = writeln!(out, "Checking files of length {} bytes", size);
    }

    fn on_group_found(&self, group: &DuplicateGroup) {
        let mut out = self.out.lock().unwrap();
        let _ = writeln!(out, "The following files are duplicates:");
        for file in &group.files {
            let _ = writeln!(out, " - {}", file.path.display());
        }
    }
}
