//! Error types for the relink library.
//!
//! This module provides the error hierarchy for all operations in the
//! relink library, using `thiserror` for ergonomic error handling.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for operations that may fail with a relink error.
///
/// # Examples
///
/// ```
/// use relink::{Error, Result};
///
/// fn example_operation() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the relink library.
///
/// This enum encompasses all failure conditions of the sync protocol plus
/// the ambient path, configuration, and I/O failures around it. The four
/// sync-specific kinds map to the phases of [`Syncer::sync`](crate::Syncer::sync):
/// reading link values, lock reclamation, the directory copy, and the final
/// symlink switch.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },

    /// A symlink's stored target string could not be read.
    #[error("cannot read symlink target of {}: {source}", path.display())]
    UnreadableSymlinkTarget {
        /// The symlink whose value could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A lock file outlived its TTL and was deleted.
    ///
    /// The holder presumably died mid-copy. The lock has been removed so a
    /// later call can proceed; this call must not.
    #[error("lock file {} expired TTL of {lock_ttl_seconds} seconds; deleted", path.display())]
    ExpiredLockDeleted {
        /// The lock file that was removed.
        path: PathBuf,
        /// The TTL the lock exceeded, in seconds.
        lock_ttl_seconds: u64,
    },

    /// The recursive directory copy failed.
    #[error("copying {} into {} failed: {source}", src.display(), dest.display())]
    CopyFailed {
        /// The resolved source directory.
        src: PathBuf,
        /// The destination parent directory.
        dest: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The atomic symlink replacement failed.
    #[error("switching symlink {} to '{new_target}' failed: {source}", path.display())]
    SwitchFailed {
        /// The symlink that should have been replaced.
        path: PathBuf,
        /// The target value the symlink should have received.
        new_target: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Map an I/O error for an operation on `path` to the matching variant.
    ///
    /// `NotFound` and `PermissionDenied` get dedicated variants so callers
    /// can match on them; everything else stays a generic I/O error.
    pub(crate) fn from_io_path(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::PathNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io(err),
        }
    }

    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use relink::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error reports a reclaimed (expired and deleted) lock.
    ///
    /// Callers that treat "retry on the next trigger" as routine can use
    /// this to downgrade the failure in their own reporting.
    #[must_use]
    pub fn is_expired_lock(&self) -> bool {
        matches!(self, Self::ExpiredLockDeleted { .. })
    }
}
