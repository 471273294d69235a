//! Top-level divmine configuration with layered resolution.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{CoverConfig, PairwiseConfig, SummaryConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`DIVMINE_*`)
/// 3. Project config (`divmine.toml` in project root)
/// 4. User config (`~/.divmine/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct DivmineConfig {
    pub covers: CoverConfig,
    pub pairwise: PairwiseConfig,
    pub summary: SummaryConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub cover_batch_size: Option<usize>,
    pub cover_pool_capacity: Option<usize>,
    pub pairwise_pool_capacity: Option<usize>,
    pub pairwise_max_patterns: Option<usize>,
    /// Applied to both the cover and the pairwise pools.
    pub worker_timeout_secs: Option<u64>,
    pub cdf_resolution: Option<usize>,
    pub average_horizon: Option<usize>,
}

impl DivmineConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        tracing::debug!(?config, "configuration resolved");
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: DivmineConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &DivmineConfig) -> Result<(), ConfigError> {
        let positive = [
            ("covers.batch_size", config.covers.batch_size),
            ("covers.pool_capacity", config.covers.pool_capacity),
            ("pairwise.pool_capacity", config.pairwise.pool_capacity),
            ("pairwise.max_patterns", config.pairwise.max_patterns),
            ("summary.cdf_resolution", config.summary.cdf_resolution),
        ];
        for (field, value) in positive {
            if value == Some(0) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(horizon) = config.summary.average_horizon {
            if horizon < 2 {
                return Err(ConfigError::ValidationFailed {
                    field: "summary.average_horizon".to_string(),
                    message: "must be at least 2".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.divmine/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".divmine").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut DivmineConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: DivmineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut DivmineConfig, other: &DivmineConfig) {
        // Covers
        if other.covers.batch_size.is_some() {
            base.covers.batch_size = other.covers.batch_size;
        }
        if other.covers.pool_capacity.is_some() {
            base.covers.pool_capacity = other.covers.pool_capacity;
        }
        if other.covers.worker_timeout_secs.is_some() {
            base.covers.worker_timeout_secs = other.covers.worker_timeout_secs;
        }

        // Pairwise
        if other.pairwise.pool_capacity.is_some() {
            base.pairwise.pool_capacity = other.pairwise.pool_capacity;
        }
        if other.pairwise.max_patterns.is_some() {
            base.pairwise.max_patterns = other.pairwise.max_patterns;
        }
        if other.pairwise.worker_timeout_secs.is_some() {
            base.pairwise.worker_timeout_secs = other.pairwise.worker_timeout_secs;
        }

        // Summary
        if other.summary.cdf_resolution.is_some() {
            base.summary.cdf_resolution = other.summary.cdf_resolution;
        }
        if other.summary.average_horizon.is_some() {
            base.summary.average_horizon = other.summary.average_horizon;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `DIVMINE_COVERS_BATCH_SIZE`, `DIVMINE_PAIRWISE_MAX_PATTERNS`, etc.
    /// Unparsable values are ignored.
    fn apply_env_overrides(config: &mut DivmineConfig) {
        if let Some(v) = env_value("DIVMINE_COVERS_BATCH_SIZE") {
            config.covers.batch_size = Some(v);
        }
        if let Some(v) = env_value("DIVMINE_COVERS_POOL_CAPACITY") {
            config.covers.pool_capacity = Some(v);
        }
        if let Some(v) = env_value("DIVMINE_PAIRWISE_POOL_CAPACITY") {
            config.pairwise.pool_capacity = Some(v);
        }
        if let Some(v) = env_value("DIVMINE_PAIRWISE_MAX_PATTERNS") {
            config.pairwise.max_patterns = Some(v);
        }
        if let Some(v) = env_value::<u64>("DIVMINE_WORKER_TIMEOUT_SECS") {
            config.covers.worker_timeout_secs = Some(v);
            config.pairwise.worker_timeout_secs = Some(v);
        }
        if let Some(v) = env_value("DIVMINE_SUMMARY_CDF_RESOLUTION") {
            config.summary.cdf_resolution = Some(v);
        }
        if let Some(v) = env_value("DIVMINE_SUMMARY_AVERAGE_HORIZON") {
            config.summary.average_horizon = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut DivmineConfig, cli: &CliOverrides) {
        if let Some(v) = cli.cover_batch_size {
            config.covers.batch_size = Some(v);
        }
        if let Some(v) = cli.cover_pool_capacity {
            config.covers.pool_capacity = Some(v);
        }
        if let Some(v) = cli.pairwise_pool_capacity {
            config.pairwise.pool_capacity = Some(v);
        }
        if let Some(v) = cli.pairwise_max_patterns {
            config.pairwise.max_patterns = Some(v);
        }
        if let Some(v) = cli.worker_timeout_secs {
            config.covers.worker_timeout_secs = Some(v);
            config.pairwise.worker_timeout_secs = Some(v);
        }
        if let Some(v) = cli.cdf_resolution {
            config.summary.cdf_resolution = Some(v);
        }
        if let Some(v) = cli.average_horizon {
            config.summary.average_horizon = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_value<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|val| val.trim().parse().ok())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
