//! Real-path resolution.
//!
//! Follows symlinks to the real filesystem path, mapping the interesting
//! I/O error kinds onto the library's error variants.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve a path to its real filesystem path by following symlinks.
///
/// The path must exist for resolution to succeed. For a symlink this
/// returns the referent's real path, which is what the lock-file path is
/// derived from.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not exist (`PathNotFound`)
/// - Permission is denied (`PermissionDenied`)
/// - An I/O error occurs
///
/// # Examples
///
/// ```no_run
/// use relink::path::resolve::resolve_real;
/// use std::path::Path;
///
/// let real = resolve_real(Path::new("/local/release/current")).unwrap();
/// assert!(real.is_absolute());
/// ```
pub fn resolve_real(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| Error::from_io_path(path, e))
}
