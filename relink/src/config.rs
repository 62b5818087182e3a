//! Configuration for the sync TTLs.
//!
//! Configuration is merged from multiple sources with precedence:
//! 1. Builder overrides (CLI flags, highest priority)
//! 2. Environment variables (`RELINK_TARGET_TTL`, `RELINK_LOCK_TTL`)
//! 3. Configuration file (explicit path, or `~/.relink/config.yaml`)
//! 4. Built-in defaults (lowest priority)

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default staleness TTL for the target symlink: 10 minutes.
pub const DEFAULT_TARGET_TTL: Duration = Duration::from_secs(600);

/// Default TTL beyond which a lock file counts as abandoned: 60 seconds.
pub const DEFAULT_LOCK_TTL: Duration = Duration::from_secs(60);

/// On-disk configuration file schema.
///
/// Both fields are optional; absent fields fall through to the
/// environment and then the built-in defaults.
///
/// # Examples
///
/// ```
/// use relink::config::FileConfig;
///
/// let parsed: FileConfig = serde_yaml::from_str("target_ttl_seconds: 300\n").unwrap();
/// assert_eq!(parsed.target_ttl_seconds, Some(300));
/// assert_eq!(parsed.lock_ttl_seconds, None);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Staleness TTL for the target symlink, in seconds.
    pub target_ttl_seconds: Option<u64>,

    /// Age beyond which a lock file counts as abandoned, in seconds.
    pub lock_ttl_seconds: Option<u64>,
}

/// Resolved configuration.
///
/// # Examples
///
/// ```
/// use relink::Config;
/// use std::time::Duration;
///
/// let config = Config::default();
/// assert_eq!(config.target_ttl, Duration::from_secs(600));
/// assert_eq!(config.lock_ttl, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How long the target symlink stays fresh after its last refresh.
    pub target_ttl: Duration,

    /// How old a lock file may grow before it is reclaimed.
    pub lock_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_ttl: DEFAULT_TARGET_TTL,
            lock_ttl: DEFAULT_LOCK_TTL,
        }
    }
}

/// Builder merging configuration sources in precedence order.
///
/// # Examples
///
/// ```
/// use relink::ConfigBuilder;
/// use std::time::Duration;
///
/// let config = ConfigBuilder::new()
///     .with_target_ttl_seconds(Some(120))
///     .build()
///     .unwrap();
/// assert_eq!(config.target_ttl, Duration::from_secs(120));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
    target_ttl_seconds: Option<u64>,
    lock_ttl_seconds: Option<u64>,
}

impl ConfigBuilder {
    /// Creates a builder with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit configuration file path.
    ///
    /// With `None`, `~/.relink/config.yaml` is loaded if it exists; an
    /// explicit path must exist and parse.
    #[must_use]
    pub fn with_file(mut self, path: Option<PathBuf>) -> Self {
        self.file = path;
        self
    }

    /// Overrides the target TTL (seconds). Takes precedence over file and
    /// environment.
    #[must_use]
    pub const fn with_target_ttl_seconds(mut self, seconds: Option<u64>) -> Self {
        self.target_ttl_seconds = seconds;
        self
    }

    /// Overrides the lock TTL (seconds). Takes precedence over file and
    /// environment.
    #[must_use]
    pub const fn with_lock_ttl_seconds(mut self, seconds: Option<u64>) -> Self {
        self.lock_ttl_seconds = seconds;
        self
    }

    /// Merge all sources and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or
    /// parsed, an environment variable holds a non-numeric value, or the
    /// merged lock TTL is zero (a zero TTL would reclaim every lock the
    /// instant it is observed).
    pub fn build(self) -> Result<Config> {
        let file = self.load_file()?;

        let target_ttl_seconds = self
            .target_ttl_seconds
            .or(parse_env_seconds("RELINK_TARGET_TTL")?)
            .or(file.target_ttl_seconds)
            .unwrap_or(DEFAULT_TARGET_TTL.as_secs());

        let lock_ttl_seconds = self
            .lock_ttl_seconds
            .or(parse_env_seconds("RELINK_LOCK_TTL")?)
            .or(file.lock_ttl_seconds)
            .unwrap_or(DEFAULT_LOCK_TTL.as_secs());

        if lock_ttl_seconds == 0 {
            return Err(Error::Validation {
                field: "lock_ttl_seconds".to_string(),
                message: "must be nonzero".to_string(),
            });
        }

        Ok(Config {
            target_ttl: Duration::from_secs(target_ttl_seconds),
            lock_ttl: Duration::from_secs(lock_ttl_seconds),
        })
    }

    fn load_file(&self) -> Result<FileConfig> {
        let path = match &self.file {
            Some(explicit) => explicit.clone(),
            None => {
                let Some(home) = home::home_dir() else {
                    return Ok(FileConfig::default());
                };
                let default_path = home.join(".relink").join("config.yaml");
                if !default_path.exists() {
                    return Ok(FileConfig::default());
                }
                default_path
            }
        };

        let contents = fs::read_to_string(&path).map_err(|e| Error::from_io_path(&path, e))?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}

fn parse_env_seconds(name: &str) -> Result<Option<u64>> {
    match env::var(name) {
        Ok(value) => value.parse::<u64>().map(Some).map_err(|_| Error::Validation {
            field: name.to_string(),
            message: format!("expected a number of seconds, got '{value}'"),
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config.target_ttl, Duration::from_secs(600));
        assert_eq!(config.lock_ttl, Duration::from_secs(60));
    }

    #[test]
    #[serial]
    fn test_builder_overrides() {
        let config = ConfigBuilder::new()
            .with_target_ttl_seconds(Some(120))
            .with_lock_ttl_seconds(Some(5))
            .build()
            .unwrap();
        assert_eq!(config.target_ttl, Duration::from_secs(120));
        assert_eq!(config.lock_ttl, Duration::from_secs(5));
    }

    #[test]
    #[serial]
    fn test_file_values_used_when_no_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target_ttl_seconds: 300").unwrap();
        writeln!(file, "lock_ttl_seconds: 30").unwrap();

        let config = ConfigBuilder::new()
            .with_file(Some(file.path().to_path_buf()))
            .build()
            .unwrap();
        assert_eq!(config.target_ttl, Duration::from_secs(300));
        assert_eq!(config.lock_ttl, Duration::from_secs(30));
    }

    #[test]
    #[serial]
    fn test_builder_beats_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target_ttl_seconds: 300").unwrap();

        let config = ConfigBuilder::new()
            .with_file(Some(file.path().to_path_buf()))
            .with_target_ttl_seconds(Some(60))
            .build()
            .unwrap();
        assert_eq!(config.target_ttl, Duration::from_secs(60));
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigBuilder::new()
            .with_file(Some(dir.path().join("missing.yaml")))
            .build()
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    #[serial]
    fn test_invalid_yaml_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target_ttl_seconds: [not a number").unwrap();

        let err = ConfigBuilder::new()
            .with_file(Some(file.path().to_path_buf()))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    #[serial]
    fn test_unknown_field_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target_ttl: 300").unwrap();

        let err = ConfigBuilder::new()
            .with_file(Some(file.path().to_path_buf()))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    #[serial]
    fn test_zero_lock_ttl_rejected() {
        let err = ConfigBuilder::new()
            .with_lock_ttl_seconds(Some(0))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    #[serial]
    fn test_env_override() {
        let saved = env::var("RELINK_TARGET_TTL").ok();

        env::set_var("RELINK_TARGET_TTL", "45");
        let config = ConfigBuilder::new().build().unwrap();
        assert_eq!(config.target_ttl, Duration::from_secs(45));

        // Builder override still wins over the environment
        let config = ConfigBuilder::new()
            .with_target_ttl_seconds(Some(10))
            .build()
            .unwrap();
        assert_eq!(config.target_ttl, Duration::from_secs(10));

        match saved {
            Some(val) => env::set_var("RELINK_TARGET_TTL", val),
            None => env::remove_var("RELINK_TARGET_TTL"),
        }
    }

    #[test]
    #[serial]
    fn test_env_invalid_value_errors() {
        let saved = env::var("RELINK_LOCK_TTL").ok();

        env::set_var("RELINK_LOCK_TTL", "soon");
        let err = ConfigBuilder::new().build().unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        match saved {
            Some(val) => env::set_var("RELINK_LOCK_TTL", val),
            None => env::remove_var("RELINK_LOCK_TTL"),
        }
    }
}
