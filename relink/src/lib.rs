#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # relink
//!
//! A library for keeping a local "current release" symlink in sync with a
//! reference symlink on shared storage.
//!
//! Many worker processes on one host read through a local symlink that must
//! track a centrally-updated symlink on shared storage. Re-resolving and
//! re-copying the release directory on every access is too expensive, so
//! relink refreshes the local copy only when the local symlink has gone stale
//! (a TTL check) and the reference symlink actually points somewhere new,
//! coordinating concurrent refreshers through a lock file next to the target.
//!
//! ## Core Types
//!
//! - [`Syncer`] and [`SyncOptions`]: the synchronization protocol
//! - [`SyncOutcome`]: which success path a sync call took
//! - [`SyncFs`] and [`RealFs`]: the filesystem capability seam
//! - [`LockFile`] and [`LockGuard`]: lock-file based mutual exclusion
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```no_run
//! use relink::{SyncOptions, Syncer};
//! use std::path::PathBuf;
//!
//! let options = SyncOptions::new(
//!     PathBuf::from("/shared/release/current"),
//!     PathBuf::from("/local/release/current"),
//! );
//! let outcome = Syncer::new().sync(&options).unwrap();
//! println!("{}", outcome.description());
//! ```

pub mod config;
pub mod error;
pub mod fsops;
pub mod lock;
pub mod logging;
pub mod path;
pub mod sync;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder, DEFAULT_LOCK_TTL, DEFAULT_TARGET_TTL};
pub use error::{Error, Result};
pub use fsops::{RealFs, SyncFs};
pub use lock::{LockAttempt, LockFile, LockGuard};
pub use logging::{init_logger, LogLevel, Logger};
pub use sync::{SyncOptions, SyncOutcome, Syncer};
