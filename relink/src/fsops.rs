//! Filesystem operations behind the sync protocol.
//!
//! The sync algorithm only ever touches the filesystem through the
//! [`SyncFs`] trait, so it can be unit-tested against an in-memory fake
//! while production code uses [`RealFs`]. All methods return
//! `std::io::Result`; the sync layer maps failures onto the error taxonomy
//! (which phase failed), which is not this module's concern.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use std::process;
use std::time::SystemTime;

use filetime::FileTime;

/// The filesystem capabilities the sync protocol requires.
///
/// One method per external collaborator: reading a symlink's stored value,
/// stat-ing and touching modification times, exclusive file creation,
/// best-effort removal, real-path resolution, recursive directory copy,
/// and atomic symlink replacement.
pub trait SyncFs {
    /// Return the literal stored target of the symlink at `path`.
    fn read_link_target(&self, path: &Path) -> io::Result<PathBuf>;

    /// Return the modification time of `path`, following symlinks.
    fn mtime(&self, path: &Path) -> io::Result<SystemTime>;

    /// Set the modification time of `path` to now, following symlinks.
    fn touch(&self, path: &Path) -> io::Result<()>;

    /// Create the file at `path`, failing with `AlreadyExists` if present.
    fn create_exclusive(&self, path: &Path) -> io::Result<()>;

    /// Remove the file at `path`. Removing an absent file is not an error.
    fn remove(&self, path: &Path) -> io::Result<()>;

    /// Resolve `path` to its real filesystem path, following symlinks.
    fn resolve_real(&self, path: &Path) -> io::Result<PathBuf>;

    /// Recursively copy the directory `src` into `dest_parent`, keeping
    /// the source's base name (`dest_parent/<basename of src>`).
    fn copy_tree(&self, src: &Path, dest_parent: &Path) -> io::Result<()>;

    /// Replace the symlink at `path` so its stored value is `new_target`,
    /// atomically at the directory-entry level.
    ///
    /// A reader resolving `path` concurrently sees either the old or the
    /// new value, never an absent or half-written entry.
    fn replace_symlink(&self, path: &Path, new_target: &Path) -> io::Result<()>;
}

/// The production [`SyncFs`] implementation backed by `std::fs`.
///
/// Symlink replacement is create-sideways-then-rename, which is the atomic
/// replace primitive POSIX gives us (`rename(2)` over an existing entry).
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new real-filesystem handle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SyncFs for RealFs {
    fn read_link_target(&self, path: &Path) -> io::Result<PathBuf> {
        fs::read_link(path)
    }

    fn mtime(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }

    fn touch(&self, path: &Path) -> io::Result<()> {
        filetime::set_file_mtime(path, FileTime::now())
    }

    fn create_exclusive(&self, path: &Path) -> io::Result<()> {
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    fn resolve_real(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn copy_tree(&self, src: &Path, dest_parent: &Path) -> io::Result<()> {
        let base_name = src.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("copy source {} has no base name", src.display()),
            )
        })?;
        copy_dir_recursive(src, &dest_parent.join(base_name))
    }

    fn replace_symlink(&self, path: &Path, new_target: &Path) -> io::Result<()> {
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("symlink path {} has no file name", path.display()),
            )
        })?;
        let parent = path.parent().unwrap_or_else(|| Path::new("."));

        // Build the new link next to the old one, then rename over it.
        let mut tmp_name = OsString::from(".");
        tmp_name.push(file_name);
        tmp_name.push(format!(".tmp.{}", process::id()));
        let tmp = parent.join(tmp_name);

        self.remove(&tmp)?;
        symlink(new_target, &tmp)?;
        fs::rename(&tmp, path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            e
        })
    }
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let target = dest.join(entry.file_name());
        if file_type.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else if file_type.is_symlink() {
            let link_value = fs::read_link(entry.path())?;
            if target.symlink_metadata().is_ok() {
                fs::remove_file(&target)?;
            }
            symlink(&link_value, &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
