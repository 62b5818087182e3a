//! Sync command implementation.
//!
//! This module implements the `sync` command, which runs one sync call
//! for a source/target symlink pair.

use crate::error::CliError;
use crate::utils::{load_configuration, prepare_path, GlobalOptions};
use clap::Args;
use std::path::PathBuf;

use relink::{Logger, SyncOptions, SyncOutcome, Syncer};

/// Run one sync call for a source/target symlink pair.
#[derive(Args)]
pub struct SyncCommand {
    /// Reference symlink (typically on shared storage)
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Local symlink to keep in sync
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Staleness TTL for the target symlink, in seconds
    #[arg(long, value_name = "SECONDS", env = "RELINK_TARGET_TTL")]
    pub ttl: Option<u64>,

    /// Age beyond which a lock file counts as abandoned, in seconds
    #[arg(long = "lock-ttl", value_name = "SECONDS", env = "RELINK_LOCK_TTL")]
    pub lock_ttl: Option<u64>,
}

impl SyncCommand {
    /// Execute the sync command.
    pub fn execute(self, global: &GlobalOptions, logger: &Logger) -> Result<(), CliError> {
        // 1. Prepare paths
        let source = prepare_path(&self.source)?;
        let target = prepare_path(&self.target)?;

        // 2. Load configuration (CLI flags > env > file > defaults)
        let config = load_configuration(global, self.ttl, self.lock_ttl)?;

        // 3. Run the sync call
        let options = SyncOptions::from_config(source, target, &config);
        logger.debug(&format!(
            "syncing {} -> {} (ttl {}s, lock ttl {}s)",
            options.source.display(),
            options.target.display(),
            options.target_ttl.as_secs(),
            options.lock_ttl.as_secs(),
        ));

        let outcome = Syncer::new().sync(&options).map_err(CliError::from)?;

        if !global.quiet {
            eprintln!("{}", outcome.description());
        }
        if outcome == SyncOutcome::InProgress {
            logger.info("target may still be behind until the lock holder finishes");
        }

        Ok(())
    }
}
