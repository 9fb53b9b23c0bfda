use std::io;

use thiserror::Error;

use crate::{CoreMask, Process};

/// Errors that can occur when querying or modifying process affinity.
///
/// Every failing operating system call is captured into the returned error value at the moment
/// it fails, together with the process it targeted. Nothing needs to be read back from shared
/// error state afterwards, so concurrent callers cannot observe each other's failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The operating system rejected the affinity query for the given process.
    ///
    /// Typical causes are a nonexistent process or insufficient permissions; the captured
    /// OS error says which.
    #[error("failed to query processor affinity of {process}: {source}")]
    QueryFailed {
        /// The process whose affinity was being queried.
        process: Process,

        /// The error reported by the operating system.
        source: io::Error,
    },

    /// The operating system rejected the affinity update for the given process.
    ///
    /// The previous affinity of the target process is left unchanged.
    #[error("failed to update processor affinity of {process}: {source}")]
    UpdateFailed {
        /// The process whose affinity was being updated.
        process: Process,

        /// The error reported by the operating system.
        source: io::Error,
    },

    /// More processors are online than a [`CoreMask`] can represent.
    ///
    /// Affinity conversions refuse to run on such hosts instead of silently dropping the
    /// processors beyond the ceiling.
    #[error(
        "{count} processors are online but a core mask can represent at most {max}",
        max = CoreMask::MAX_PROCESSORS
    )]
    TooManyProcessors {
        /// The online processor count reported by the operating system.
        count: usize,
    },
}

/// A specialized `Result` type for affinity operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Renders the calling thread's last operating system error indicator as a string.
///
/// This reads genuinely global, mutable, per-thread state: every failing OS call overwrites it,
/// so it must be read immediately after the failure of interest, before any other OS-facing
/// operation. The affinity operations of this crate already capture the OS error into their
/// returned [`Error`] values, which is the preferred way to learn why a call failed; this
/// accessor exists for callers porting from interfaces built around a last-error read.
#[must_use]
pub fn last_os_error_message() -> String {
    io::Error::last_os_error().to_string()
}
