use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable the binary reads the config path from.
pub const CONFIG_ENV_VAR: &str = "TIMETABLE_CONFLICTS_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Every field has a default, so an empty file (or no file) is valid:
///
/// ```toml
/// [workload]
/// underutilized_max = 12
/// optimal_max = 16
/// high_max = 20
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub workload: WorkloadThresholds,
}

/// Weekly period thresholds for classifying teacher workload. A teacher with
/// at most `underutilized_max` periods is underutilized, up to `optimal_max`
/// optimal, up to `high_max` high, and overloaded beyond that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkloadThresholds {
    #[serde(default = "default_underutilized_max")]
    pub underutilized_max: u32,
    #[serde(default = "default_optimal_max")]
    pub optimal_max: u32,
    /// Hard weekly maximum.
    #[serde(default = "default_high_max")]
    pub high_max: u32,
}

fn default_underutilized_max() -> u32 {
    12
}

fn default_optimal_max() -> u32 {
    16
}

fn default_high_max() -> u32 {
    20
}

impl Default for WorkloadThresholds {
    fn default() -> Self {
        WorkloadThresholds {
            underutilized_max: default_underutilized_max(),
            optimal_max: default_optimal_max(),
            high_max: default_high_max(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from the path in [`CONFIG_ENV_VAR`], or fall back to defaults
    /// when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        let w = &self.workload;
        if !(w.underutilized_max < w.optimal_max && w.optimal_max < w.high_max) {
            return Err(ConfigError::Invalid(format!(
                "workload thresholds must increase: underutilized_max ({}) < optimal_max ({}) < high_max ({})",
                w.underutilized_max, w.optimal_max, w.high_max
            )));
        }
        Ok(())
    }
}
