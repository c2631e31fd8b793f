//! Streaming BLAKE3 file hasher.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing BLAKE3
//! digests of file contents. Files are read in fixed 1 MiB chunks, so
//! peak memory stays bounded no matter how large the input is. This is
//! a correctness requirement for very large files, not an optimization.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::Hasher;
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let digest = hasher.hash_file(Path::new("/some/file.bin")).unwrap();
//! println!("{}", dupescan::scanner::hash_to_hex(&digest));
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::HashError;

/// Fixed read size for streaming hashing: 1 MiB.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// A 32-byte BLAKE3 content digest.
pub type Digest = [u8; 32];

/// Render a digest as a lowercase hex string.
#[must_use]
pub fn hash_to_hex(digest: &Digest) -> String {
    use std::fmt::Write as _;

    let mut s = String::with_capacity(64);
    for byte in digest {
        let _ = write!(s, "{:02x}", byte);
    }
    s
}

/// Streaming file hasher.
///
/// Cheap to construct and clone-free to share behind an [`Arc`]; holds
/// only the optional shutdown flag.
#[derive(Debug, Default)]
pub struct Hasher {
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shutdown flag, checked between chunks.
    ///
    /// When the flag is set mid-file, hashing stops with
    /// [`HashError::Interrupted`].
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

    /// Compute the full-content digest of a file.
    ///
    /// Reads the file in [`CHUNK_SIZE`] chunks; never buffers the whole
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read, or if
    /// the shutdown flag is raised mid-file.
    pub fn hash_file(&self, path: &Path) -> Result<Digest, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;

        let mut hasher = blake3::Hasher::new();
        let mut buf = vec![0u8; CHUNK_SIZE];

        loop {
            if self.is_shutdown_requested() {
                return Err(HashError::Interrupted);
            }
            let n = file
                .read(&mut buf)
                .map_err(|e| HashError::from_io(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(*hasher.finalize().as_bytes())
    }
}
