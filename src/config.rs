//! Layered configuration.
//!
//! Settings are merged in increasing priority:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config PATH`, or `config.toml` in the platform config dir)
//! 3. `FILECACHE_*` environment variables (e.g. `FILECACHE_RECHECK_DELAY_SECS=5`)
//! 4. CLI flags, applied by the caller on the extracted value
//!
//! # Example
//!
//! ```toml
//! recheck_delay_secs = 2.5
//! fingerprint = "content-hash"
//! watch_interval_ms = 250
//! ```

use crate::error::ConfigError;
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FILECACHE_";

/// Which fingerprint strategy to use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FingerprintKind {
    /// inode, size, mtime and ctime from `stat`
    #[default]
    Metadata,
    /// BLAKE3 digest of the file content
    ContentHash,
}

/// Cache and CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds during which cached content is trusted without a fingerprint check.
    pub recheck_delay_secs: f64,
    /// Fingerprint strategy.
    pub fingerprint: FingerprintKind,
    /// Poll interval of `filecache watch`, in milliseconds.
    pub watch_interval_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            recheck_delay_secs: 1.0,
            fingerprint: FingerprintKind::Metadata,
            watch_interval_ms: 500,
        }
    }
}

impl CacheConfig {
    /// Load defaults < file < environment.
    ///
    /// The result is not validated: CLI flags may still replace a bad value,
    /// so callers run [`validate`](Self::validate) once every layer is applied.
    /// An explicit `file` must exist; the platform default file is optional.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let figment = match file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::MissingFile(path.to_path_buf()));
                }
                Self::figment(Some(path))
            }
            None => Self::figment(Self::default_path().as_deref()),
        };
        let config: Self = figment.extract()?;
        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// The provider stack, without validation.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// `config.toml` in the platform-specific config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "filecache", "filecache")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Reject values the cache cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.recheck_delay()?;
        if self.watch_interval_ms == 0 {
            return Err(ConfigError::InvalidWatchInterval);
        }
        Ok(())
    }

    /// The recheck delay as a [`Duration`].
    pub fn recheck_delay(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.recheck_delay_secs)
            .map_err(|_| ConfigError::InvalidRecheckDelay(self.recheck_delay_secs))
    }

    /// The watch poll interval as a [`Duration`].
    #[must_use]
    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms)
    }
}
