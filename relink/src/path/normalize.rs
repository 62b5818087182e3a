//! Path normalization functions.
//!
//! This module provides the canonical-relative-form normalization the lock
//! path derivation is specified against, plus tilde expansion for paths
//! supplied on the command line.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Reduce a slash-delimited path to its canonical relative form.
///
/// The rules, in order of application per segment:
/// - empty segments and `.` segments are dropped;
/// - a `..` segment removes the most recently kept segment, or is dropped
///   when none exists (it never appears in the output);
/// - the remaining segments are joined with `/`.
///
/// The result never starts with `/` and is `""` for an empty or root-only
/// input. The function is pure and total; normalizing twice gives the same
/// result as normalizing once.
///
/// # Examples
///
/// ```
/// use relink::path::normalize::normalize_segments;
///
/// assert_eq!(normalize_segments(""), "");
/// assert_eq!(normalize_segments("/"), "");
/// assert_eq!(normalize_segments("/etc/hosts"), "etc/hosts");
/// assert_eq!(normalize_segments(".././/tmp/../home//admin/./.ssh"), "home/admin/.ssh");
/// ```
#[must_use]
pub fn normalize_segments(path: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                kept.pop();
            }
            other => kept.push(other),
        }
    }
    kept.join("/")
}

/// Expand tilde (~) to the home directory.
///
/// This function handles `~` and `~/path` but does not support `~user` syntax.
///
/// # Errors
///
/// Returns an error if:
/// - The path contains invalid UTF-8
/// - The home directory cannot be determined
/// - The path uses `~user` syntax (not supported)
///
/// # Examples
///
/// ```
/// use relink::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// // Expands ~/path to home/path
/// let expanded = expand_tilde(Path::new("~/releases")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("releases"));
///
/// // Leaves other paths unchanged
/// let expanded = expand_tilde(Path::new("/absolute")).unwrap();
/// assert_eq!(expanded, Path::new("/absolute"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    // Get home directory using the home crate
    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if let Some(rest) = path_str.strip_prefix("~/") {
        Ok(home.join(rest))
    } else {
        // ~user syntax not supported
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}
