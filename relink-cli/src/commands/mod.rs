//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `sync`: run one sync call for a source/target symlink pair
//! - `normalize`: print a path's canonical relative form
//! - `completions`: generate shell completion scripts

pub mod completions;
pub mod normalize;
pub mod sync;

pub use completions::CompletionsCommand;
pub use normalize::NormalizeCommand;
pub use sync::SyncCommand;
