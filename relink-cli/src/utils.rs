//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands:
//! path preparation and configuration loading.

use crate::error::CliError;
use std::path::{Path, PathBuf};

use relink::{Config, ConfigBuilder};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    #[allow(dead_code)] // Read via the logger initialized in main.rs
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Path to a configuration file.
    pub config: Option<PathBuf>,
}

/// Prepare a user-supplied path: expand `~`, leave everything else as
/// given.
///
/// Symlinks are deliberately not followed here; the sync protocol itself
/// decides what to resolve and when.
pub fn prepare_path(path: &Path) -> Result<PathBuf, CliError> {
    relink::path::expand_tilde(path).map_err(CliError::from)
}

/// Load configuration with CLI flags taking precedence over the
/// environment and any configuration file.
pub fn load_configuration(
    global: &GlobalOptions,
    target_ttl_seconds: Option<u64>,
    lock_ttl_seconds: Option<u64>,
) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .with_file(global.config.clone())
        .with_target_ttl_seconds(target_ttl_seconds)
        .with_lock_ttl_seconds(lock_ttl_seconds)
        .build()
        .map_err(|e| match e {
            relink::Error::Validation { field, message } => {
                CliError::Config(format!("{field}: {message}"))
            }
            relink::Error::Configuration(e) => CliError::Config(e.to_string()),
            other => CliError::from(other),
        })
}
