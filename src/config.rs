//! Configuration for zram-advisor.
//!
//! YAML file with precedence: CLI > ENV > file > defaults.

use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `model.limit_pct`.
pub const ENV_LIMIT_PCT: &str = "ZRAM_ADVISOR_LIMIT_PCT";
/// Environment variable overriding `global.update_ms`.
pub const ENV_UPDATE_MS: &str = "ZRAM_ADVISOR_UPDATE_MS";

/// Refresh cadence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Refresh interval in milliseconds.
    #[serde(default = "default_update_ms")]
    pub update_ms: u64,

    /// Delay before the first live render, in milliseconds.
    #[serde(default = "default_warmup_ms")]
    pub warmup_ms: u64,
}

fn default_update_ms() -> u64 {
    1000
}
fn default_warmup_ms() -> u64 {
    2000
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            update_ms: default_update_ms(),
            warmup_ms: default_warmup_ms(),
        }
    }
}

/// Projection model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Percentage of RAM compressed swap may claim when projecting.
    #[serde(default = "default_limit_pct")]
    pub limit_pct: f64,
}

fn default_limit_pct() -> f64 {
    crate::analyzers::DEFAULT_LIMIT_PCT
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            limit_pct: default_limit_pct(),
        }
    }
}

/// Where raw stats and static context are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_block_dir")]
    pub block_dir: PathBuf,
    #[serde(default = "default_meminfo")]
    pub meminfo: PathBuf,
    #[serde(default = "default_vm_dir")]
    pub vm_dir: PathBuf,
    #[serde(default = "default_os_release")]
    pub os_release: PathBuf,
    #[serde(default = "default_lsb_release")]
    pub lsb_release: PathBuf,
}

fn default_block_dir() -> PathBuf {
    "/sys/class/block".into()
}
fn default_meminfo() -> PathBuf {
    "/proc/meminfo".into()
}
fn default_vm_dir() -> PathBuf {
    "/proc/sys/vm".into()
}
fn default_os_release() -> PathBuf {
    "/etc/os-release".into()
}
fn default_lsb_release() -> PathBuf {
    "/etc/lsb-release".into()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            block_dir: default_block_dir(),
            meminfo: default_meminfo(),
            vm_dir: default_vm_dir(),
            os_release: default_os_release(),
            lsb_release: default_lsb_release(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub global: GlobalConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub paths: PathsConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            global: GlobalConfig::default(),
            model: ModelConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location (`<config dir>/zram-advisor/config.yaml`).
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("zram-advisor").join("config.yaml"))
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| AdvisorError::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            AdvisorError::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// File layer: an explicit path must exist, the default path may not.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, or any file is malformed.
    pub fn from_file_layer(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load(path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but not a number.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_LIMIT_PCT) {
            self.model.limit_pct = v.trim().parse().map_err(|_| AdvisorError::ConfigInvalid {
                key: ENV_LIMIT_PCT.to_string(),
                message: format!("'{v}' is not a number"),
            })?;
        }
        if let Some(v) = lookup(ENV_UPDATE_MS) {
            self.global.update_ms = v.trim().parse().map_err(|_| AdvisorError::ConfigInvalid {
                key: ENV_UPDATE_MS.to_string(),
                message: format!("'{v}' is not a whole number of milliseconds"),
            })?;
        }
        Ok(())
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::ConfigInvalid`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        let pct = self.model.limit_pct;
        if !pct.is_finite() || pct <= 0.0 || pct > 100.0 {
            return Err(AdvisorError::ConfigInvalid {
                key: "model.limit_pct".to_string(),
                message: format!("{pct} is outside (0, 100]"),
            });
        }
        if self.global.update_ms == 0 {
            return Err(AdvisorError::ConfigInvalid {
                key: "global.update_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the update interval as a Duration.
    #[must_use]
    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.global.update_ms)
    }

    /// Returns the warm-up delay as a Duration.
    #[must_use]
    pub fn warmup(&self) -> Duration {
        Duration::from_millis(self.global.warmup_ms)
    }
}
