//! Process exit codes.

/// Exit codes for the dupescan binary.
///
/// - 0: scan completed normally (whether or not duplicates were found)
/// - 1: fatal error (bad root, unreadable directory, unexpected failure)
/// - 130: interrupted by user (128 + SIGINT)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Scan completed normally.
    Success = 0,
    /// A fatal error occurred.
    GeneralError = 1,
    /// Scan was interrupted by user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
