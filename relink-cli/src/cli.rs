//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, NormalizeCommand, SyncCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for keeping a local release symlink in sync.
#[derive(Parser)]
#[command(name = "relink")]
#[command(version, about = "Keep a local release symlink in sync with a shared one", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Path to a configuration file
    #[arg(long, value_name = "PATH", global = true, env = "RELINK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Run one sync call for a source/target symlink pair
    Sync(SyncCommand),

    /// Print a path's canonical relative form
    Normalize(NormalizeCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
