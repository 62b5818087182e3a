//! Common test utilities for CLI integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use filetime::FileTime;

/// Release fixture roots: shared publishes v1.0.1, local lags at v1.0.0.
#[allow(dead_code)]
pub struct Fixture {
    pub root: PathBuf,
    pub source: PathBuf,
    pub target: PathBuf,
    _dir: tempfile::TempDir,
}

/// Build the standard release-deployment layout under a temp directory.
#[allow(dead_code)]
pub fn setup() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();

    for (version, files) in [
        ("v1.0.0", ["file1.0.0.1.txt", "file1.0.0.2.txt"]),
        ("v1.0.1", ["file1.0.1.1.txt", "file1.0.1.2.txt"]),
    ] {
        let shared = root.join("shared/release").join(version);
        fs::create_dir_all(&shared).unwrap();
        for name in files {
            fs::write(shared.join(name), "").unwrap();
        }
    }
    let local = root.join("local/release/v1.0.0");
    fs::create_dir_all(&local).unwrap();
    fs::write(local.join("file1.0.0.1.txt"), "").unwrap();

    std::os::unix::fs::symlink("v1.0.1", root.join("shared/release/current")).unwrap();
    std::os::unix::fs::symlink("v1.0.0", root.join("local/release/current")).unwrap();

    Fixture {
        source: root.join("shared/release/current"),
        target: root.join("local/release/current"),
        root,
        _dir: dir,
    }
}

/// Set a path's mtime to `seconds` seconds in the past, following symlinks.
#[allow(dead_code)]
pub fn backdate(path: &Path, seconds: u64) {
    let past = SystemTime::now() - Duration::from_secs(seconds);
    filetime::set_file_mtime(path, FileTime::from_system_time(past)).unwrap();
}
