//! Normalize command implementation.
//!
//! This module implements the `normalize` command, which prints a path's
//! canonical relative form: no leading slash, no empty or `.` segments,
//! `..` resolved against preceding segments.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;

use relink::path::normalize_segments;

/// Print a path's canonical relative form.
#[derive(Args)]
pub struct NormalizeCommand {
    /// Slash-delimited path to normalize
    #[arg(value_name = "PATH")]
    pub path: String,
}

impl NormalizeCommand {
    /// Execute the normalize command.
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        println!("{}", normalize_segments(&self.path));
        Ok(())
    }
}
