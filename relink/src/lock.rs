//! Lock-file based mutual exclusion.
//!
//! The lock is an ordinary file whose existence plus modification time is
//! the entire lock state: create-exclusive to acquire, delete to release,
//! age-based override for abandoned holders. No owner identity and no
//! reentrancy, so it coordinates any set of processes sharing the
//! filesystem the lock lives on, and nothing beyond that.
//!
//! [`LockFile`] names the lock and its TTL; a successful acquisition hands
//! back a [`LockGuard`] whose `Drop` does a best-effort release, so every
//! exit path of the sync algorithm releases the lock.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::error::{Error, Result};
use crate::fsops::SyncFs;

/// A lock file keyed by a sync target's resolved path.
///
/// The lock path is the resolved target path with `.lck` appended, so the
/// mutual exclusion domain is the target directory, not the
/// (source, target) pair.
///
/// # Examples
///
/// ```
/// use relink::LockFile;
/// use std::path::Path;
/// use std::time::Duration;
///
/// let lock = LockFile::for_target(Path::new("/local/release/v1.0.0"), Duration::from_secs(60));
/// assert_eq!(lock.path(), Path::new("/local/release/v1.0.0.lck"));
/// ```
#[derive(Debug, Clone)]
pub struct LockFile {
    path: PathBuf,
    ttl: Duration,
}

/// Result of a non-blocking lock acquisition attempt.
#[derive(Debug)]
pub enum LockAttempt<'f, F: SyncFs> {
    /// The lock file was created; this process holds the lock.
    Acquired(LockGuard<'f, F>),
    /// A fresh lock file exists; another process holds the lock.
    HeldByOther,
}

/// Holds an acquired lock until released or dropped.
///
/// Dropping the guard removes the lock file best-effort; use
/// [`release`](LockGuard::release) where a removal failure must surface.
#[derive(Debug)]
pub struct LockGuard<'f, F: SyncFs> {
    fs: &'f F,
    path: PathBuf,
    released: bool,
}

impl LockFile {
    /// Creates the lock description for a resolved target path.
    ///
    /// `.lck` is appended to the full file name rather than substituted
    /// for an existing extension, so `v1.0.0` locks at `v1.0.0.lck`.
    #[must_use]
    pub fn for_target(resolved_target: &Path, ttl: Duration) -> Self {
        let mut name = resolved_target.as_os_str().to_os_string();
        name.push(".lck");
        Self {
            path: PathBuf::from(name),
            ttl,
        }
    }

    /// The lock file's path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The age beyond which a held lock counts as abandoned.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Attempt to acquire the lock without blocking.
    ///
    /// - Exclusive creation succeeds: returns [`LockAttempt::Acquired`].
    /// - The lock file exists and is younger than the TTL: returns
    ///   [`LockAttempt::HeldByOther`].
    /// - The lock file exists and is at least TTL old: the file is deleted
    ///   and the call fails with [`Error::ExpiredLockDeleted`]. The holder
    ///   presumably died; a later call gets a clean acquisition.
    ///
    /// # Errors
    ///
    /// Returns `ExpiredLockDeleted` for a reclaimed stale lock, or the
    /// mapped I/O error if creation, stat, or removal fails unexpectedly.
    pub fn try_acquire<'f, F: SyncFs>(
        &self,
        fs: &'f F,
        now: SystemTime,
    ) -> Result<LockAttempt<'f, F>> {
        match fs.create_exclusive(&self.path) {
            Ok(()) => Ok(LockAttempt::Acquired(LockGuard {
                fs,
                path: self.path.clone(),
                released: false,
            })),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                let lock_mtime = match fs.mtime(&self.path) {
                    Ok(t) => t,
                    // Holder released between our create attempt and the
                    // stat; the sync was just handled elsewhere.
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        return Ok(LockAttempt::HeldByOther)
                    }
                    Err(e) => return Err(Error::from_io_path(&self.path, e)),
                };

                let expired = now
                    .checked_sub(self.ttl)
                    .is_some_and(|cutoff| lock_mtime <= cutoff);
                if expired {
                    fs.remove(&self.path)
                        .map_err(|e| Error::from_io_path(&self.path, e))?;
                    Err(Error::ExpiredLockDeleted {
                        path: self.path.clone(),
                        lock_ttl_seconds: self.ttl.as_secs(),
                    })
                } else {
                    Ok(LockAttempt::HeldByOther)
                }
            }
            Err(e) => Err(Error::from_io_path(&self.path, e)),
        }
    }
}

impl<F: SyncFs> LockGuard<'_, F> {
    /// The held lock file's path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock, surfacing removal failures.
    ///
    /// Removing an already-absent lock file is not an error.
    ///
    /// # Errors
    ///
    /// Returns the mapped I/O error if the lock file cannot be removed.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        self.fs
            .remove(&self.path)
            .map_err(|e| Error::from_io_path(&self.path, e))
    }
}

impl<F: SyncFs> Drop for LockGuard<'_, F> {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.fs.remove(&self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsops::RealFs;
    use filetime::FileTime;
    use std::fs;

    fn backdate(path: &Path, seconds: u64) {
        let past = SystemTime::now() - Duration::from_secs(seconds);
        filetime::set_file_mtime(path, FileTime::from_system_time(past)).unwrap();
    }

    #[test]
    fn test_lock_path_appends_suffix() {
        let lock = LockFile::for_target(Path::new("/local/release/v1.0.0"), Duration::from_secs(60));
        assert_eq!(lock.path(), Path::new("/local/release/v1.0.0.lck"));
        assert_eq!(lock.ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_lock_path_keeps_dotted_names_intact() {
        // `.lck` must be appended, not swapped in for the trailing
        // version component.
        let lock = LockFile::for_target(Path::new("/r/v1.0.0"), Duration::from_secs(60));
        assert!(lock.path().to_string_lossy().ends_with("v1.0.0.lck"));
    }

    #[test]
    fn test_acquire_and_release() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("v1.0.0");
        let lock = LockFile::for_target(&target, Duration::from_secs(60));
        let fs_ops = RealFs::new();

        let attempt = lock.try_acquire(&fs_ops, SystemTime::now()).unwrap();
        let guard = match attempt {
            LockAttempt::Acquired(g) => g,
            LockAttempt::HeldByOther => panic!("expected acquisition"),
        };
        assert!(lock.path().exists());

        guard.release().unwrap();
        assert!(!lock.path().exists());
    }

    #[test]
    fn test_fresh_lock_defers_to_holder() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("v1.0.0");
        let lock = LockFile::for_target(&target, Duration::from_secs(60));
        let fs_ops = RealFs::new();

        fs::write(lock.path(), "").unwrap();

        match lock.try_acquire(&fs_ops, SystemTime::now()).unwrap() {
            LockAttempt::HeldByOther => {}
            LockAttempt::Acquired(_) => panic!("lock should be held"),
        }
        // The holder's lock file is untouched
        assert!(lock.path().exists());
    }

    #[test]
    fn test_stale_lock_is_deleted_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("v1.0.0");
        let lock = LockFile::for_target(&target, Duration::from_secs(60));
        let fs_ops = RealFs::new();

        fs::write(lock.path(), "").unwrap();
        backdate(lock.path(), 120);

        let err = lock.try_acquire(&fs_ops, SystemTime::now()).unwrap_err();
        assert!(err.is_expired_lock());
        assert!(!lock.path().exists());

        // The next attempt gets a clean acquisition
        match lock.try_acquire(&fs_ops, SystemTime::now()).unwrap() {
            LockAttempt::Acquired(guard) => guard.release().unwrap(),
            LockAttempt::HeldByOther => panic!("expected acquisition after reclaim"),
        };
    }

    #[test]
    fn test_drop_releases_best_effort() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("v1.0.0");
        let lock = LockFile::for_target(&target, Duration::from_secs(60));
        let fs_ops = RealFs::new();

        let attempt = lock.try_acquire(&fs_ops, SystemTime::now()).unwrap();
        match attempt {
            LockAttempt::Acquired(guard) => drop(guard),
            LockAttempt::HeldByOther => panic!("expected acquisition"),
        }
        assert!(!lock.path().exists());
    }
}
