//! The symlink synchronization protocol.
//!
//! [`Syncer::sync`] keeps a local symlink pointing at the same target as a
//! reference symlink, refreshing the local copy of the target directory
//! only when the local symlink has gone stale and the two symlinks
//! actually diverge. The phases, in order:
//!
//! 1. **Staleness gate** — if the target symlink's modification time is
//!    within the target TTL, return without touching anything.
//! 2. **Lock** — derive the lock path from the target's resolved path and
//!    acquire it with exclusive-create. A fresh foreign lock means another
//!    process is already syncing (success); a stale one is reclaimed and
//!    reported as an error.
//! 3. **Compare** — read both symlinks' raw stored values. Equal values
//!    mean the target is correct: refresh its mtime and stop.
//! 4. **Copy** — materialize the source's current referent next to the
//!    target's referent, keeping the base name.
//! 5. **Switch** — atomically repoint the target symlink at the value read
//!    from the source in phase 3.
//!
//! The lock is released on every exit path; error paths release it
//! best-effort through the guard's `Drop`. Nothing is retried internally;
//! the caller's next trigger is the retry.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use crate::config::{Config, DEFAULT_LOCK_TTL, DEFAULT_TARGET_TTL};
use crate::error::{Error, Result};
use crate::fsops::{RealFs, SyncFs};
use crate::lock::{LockAttempt, LockFile};

/// Options for one sync call.
///
/// # Examples
///
/// ```
/// use relink::SyncOptions;
/// use std::path::PathBuf;
/// use std::time::Duration;
///
/// let options = SyncOptions::new(
///     PathBuf::from("/shared/release/current"),
///     PathBuf::from("/local/release/current"),
/// )
/// .with_target_ttl(Duration::from_secs(300));
///
/// assert_eq!(options.target_ttl, Duration::from_secs(300));
/// assert_eq!(options.lock_ttl, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// The reference symlink, typically on shared storage.
    pub source: PathBuf,

    /// The local symlink to keep in sync.
    pub target: PathBuf,

    /// How long the target symlink stays fresh after its last refresh.
    pub target_ttl: Duration,

    /// How old a lock file may grow before it is reclaimed.
    pub lock_ttl: Duration,
}

impl SyncOptions {
    /// Creates options with the default TTLs (600 s target, 60 s lock).
    #[must_use]
    pub fn new(source: PathBuf, target: PathBuf) -> Self {
        Self {
            source,
            target,
            target_ttl: DEFAULT_TARGET_TTL,
            lock_ttl: DEFAULT_LOCK_TTL,
        }
    }

    /// Creates options taking both TTLs from a [`Config`].
    #[must_use]
    pub fn from_config(source: PathBuf, target: PathBuf, config: &Config) -> Self {
        Self {
            source,
            target,
            target_ttl: config.target_ttl,
            lock_ttl: config.lock_ttl,
        }
    }

    /// Sets the target staleness TTL.
    #[must_use]
    pub const fn with_target_ttl(mut self, ttl: Duration) -> Self {
        self.target_ttl = ttl;
        self
    }

    /// Sets the lock reclamation TTL.
    #[must_use]
    pub const fn with_lock_ttl(mut self, ttl: Duration) -> Self {
        self.lock_ttl = ttl;
        self
    }
}

/// Which success path a sync call took.
///
/// Every variant is a success; the distinctions matter for logging and for
/// callers that want to know whether the symlink is guaranteed current.
/// After [`InProgress`](SyncOutcome::InProgress) the target may still be
/// behind: another process holds the lock and is trusted to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The target symlink was within its TTL; nothing was checked or touched.
    Fresh,
    /// Another process holds a fresh lock and is handling the sync.
    InProgress,
    /// Source and target already agree; the target's mtime was refreshed.
    AlreadyInSync,
    /// The target directory was copied and the symlink switched.
    Updated,
}

impl SyncOutcome {
    /// Human-readable description of the outcome.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Fresh => "target symlink is fresh; nothing to do",
            Self::InProgress => "another process is syncing; deferred",
            Self::AlreadyInSync => "target already in sync; refreshed timestamp",
            Self::Updated => "copied release and switched target symlink",
        }
    }
}

/// Runs the sync protocol against a [`SyncFs`] implementation.
///
/// Production code uses [`Syncer::new`] (backed by [`RealFs`]); tests can
/// inject an in-memory filesystem through [`Syncer::with_fs`].
#[derive(Debug, Default)]
pub struct Syncer<F: SyncFs = RealFs> {
    fs: F,
}

impl Syncer<RealFs> {
    /// Creates a syncer backed by the real filesystem.
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFs::new() }
    }
}

impl<F: SyncFs> Syncer<F> {
    /// Creates a syncer backed by the given filesystem implementation.
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Run one sync call.
    ///
    /// # Errors
    ///
    /// - [`Error::ExpiredLockDeleted`]: a stale lock was found and removed;
    ///   retry on the next trigger.
    /// - [`Error::UnreadableSymlinkTarget`]: a symlink's stored value could
    ///   not be read.
    /// - [`Error::CopyFailed`] / [`Error::SwitchFailed`]: the copy or the
    ///   atomic switch failed. The lock is released in both cases.
    /// - Mapped I/O errors from the staleness stat or path resolution.
    pub fn sync(&self, options: &SyncOptions) -> Result<SyncOutcome> {
        self.sync_at(options, SystemTime::now())
    }

    fn sync_at(&self, options: &SyncOptions, now: SystemTime) -> Result<SyncOutcome> {
        // Phase 1: staleness gate. The common case must not mutate anything.
        let target_mtime = self
            .fs
            .mtime(&options.target)
            .map_err(|e| Error::from_io_path(&options.target, e))?;
        let still_fresh = match now.checked_sub(options.target_ttl) {
            Some(cutoff) => target_mtime > cutoff,
            None => true,
        };
        if still_fresh {
            return Ok(SyncOutcome::Fresh);
        }

        // Phase 2: lock keyed by the target's resolved path.
        let target_real = self
            .fs
            .resolve_real(&options.target)
            .map_err(|e| Error::from_io_path(&options.target, e))?;
        let lock = LockFile::for_target(&target_real, options.lock_ttl);
        let guard = match lock.try_acquire(&self.fs, now)? {
            LockAttempt::Acquired(guard) => guard,
            LockAttempt::HeldByOther => return Ok(SyncOutcome::InProgress),
        };

        // Phase 3: compare raw stored symlink values, not resolved paths.
        // From here on the guard releases the lock on every early return.
        let source_value = self
            .fs
            .read_link_target(&options.source)
            .map_err(|e| Error::UnreadableSymlinkTarget {
                path: options.source.clone(),
                source: e,
            })?;
        let target_value = self
            .fs
            .read_link_target(&options.target)
            .map_err(|e| Error::UnreadableSymlinkTarget {
                path: options.target.clone(),
                source: e,
            })?;

        if source_value == target_value {
            self.fs
                .touch(&options.target)
                .map_err(|e| Error::from_io_path(&options.target, e))?;
            guard.release()?;
            return Ok(SyncOutcome::AlreadyInSync);
        }

        // Phase 4: copy the source's referent next to the target's referent.
        let source_real = self
            .fs
            .resolve_real(&options.source)
            .map_err(|e| Error::from_io_path(&options.source, e))?;
        let dest_parent = target_real
            .parent()
            .ok_or_else(|| Error::InvalidPath {
                path: target_real.clone(),
                reason: "target resolves to a path with no parent directory".to_string(),
            })?
            .to_path_buf();
        if let Err(e) = self.fs.copy_tree(&source_real, &dest_parent) {
            return Err(Error::CopyFailed {
                src: source_real,
                dest: dest_parent,
                source: e,
            });
        }

        // Phase 5: atomic switch to the value read in phase 3, then release
        // the lock regardless of how the switch went.
        let switch_result = self.fs.replace_symlink(&options.target, &source_value);
        guard.release()?;
        if let Err(e) = switch_result {
            return Err(Error::SwitchFailed {
                path: options.target.clone(),
                new_target: source_value.display().to_string(),
                source: e,
            });
        }

        Ok(SyncOutcome::Updated)
    }
}
