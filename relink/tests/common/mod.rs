//! Common test utilities for integration tests.
//!
//! Builds the release-deployment fixture the sync protocol is designed
//! for: a shared release tree with versioned directories and a `current`
//! symlink, mirrored by a local tree that lags one version behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use filetime::FileTime;

/// A node in a fixture tree.
#[allow(dead_code)]
pub enum Node {
    /// A directory with named children.
    Dir(Vec<(&'static str, Node)>),
    /// An empty regular file.
    File,
    /// A symlink with the given stored value.
    Link(&'static str),
}

/// Materialize a fixture tree under `root`.
#[allow(dead_code)]
pub fn create_tree(root: &Path, node: &Node) {
    match node {
        Node::Dir(children) => {
            fs::create_dir_all(root).unwrap();
            for (name, child) in children {
                create_tree(&root.join(name), child);
            }
        }
        Node::File => {
            fs::write(root, "").unwrap();
        }
        Node::Link(value) => {
            std::os::unix::fs::symlink(value, root).unwrap();
        }
    }
}

/// Standard fixture: shared storage carries v1.0.0 and v1.0.1 with
/// `current -> v1.0.1`; local storage carries only v1.0.0 with
/// `current -> v1.0.0`.
#[allow(dead_code)]
pub fn release_fixture() -> Node {
    Node::Dir(vec![
        (
            "shared",
            Node::Dir(vec![(
                "release",
                Node::Dir(vec![
                    (
                        "v1.0.0",
                        Node::Dir(vec![
                            ("file1.0.0.1.txt", Node::File),
                            ("file1.0.0.2.txt", Node::File),
                            ("file1.0.0.3.txt", Node::File),
                        ]),
                    ),
                    (
                        "v1.0.1",
                        Node::Dir(vec![
                            ("file1.0.1.1.txt", Node::File),
                            ("file1.0.1.2.txt", Node::File),
                            ("file1.0.1.3.txt", Node::File),
                        ]),
                    ),
                    ("current", Node::Link("v1.0.1")),
                ]),
            )]),
        ),
        (
            "local",
            Node::Dir(vec![(
                "release",
                Node::Dir(vec![
                    (
                        "v1.0.0",
                        Node::Dir(vec![
                            ("file1.0.0.1.txt", Node::File),
                            ("file1.0.0.2.txt", Node::File),
                            ("file1.0.0.3.txt", Node::File),
                        ]),
                    ),
                    ("current", Node::Link("v1.0.0")),
                ]),
            )]),
        ),
    ])
}

/// Set a path's mtime to `seconds` seconds in the past, following symlinks
/// the way the staleness gate does.
#[allow(dead_code)]
pub fn backdate(path: &Path, seconds: u64) {
    let past = SystemTime::now() - Duration::from_secs(seconds);
    filetime::set_file_mtime(path, FileTime::from_system_time(past)).unwrap();
}

/// Age of a path's mtime, following symlinks.
#[allow(dead_code)]
pub fn mtime_age(path: &Path) -> Duration {
    let mtime = fs::metadata(path).unwrap().modified().unwrap();
    SystemTime::now().duration_since(mtime).unwrap_or_default()
}

/// The lock path for a local release version directory.
#[allow(dead_code)]
pub fn lock_path(root: &Path, version: &str) -> PathBuf {
    root.join("local/release").join(format!("{version}.lck"))
}
