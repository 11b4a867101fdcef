//! Figment-based configuration loading and validation

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;
use crate::domain::models::MAX_SWARM_SIZE;

/// Project-local configuration directory
pub const CONFIG_DIR: &str = ".shame";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "SHAME_";

/// Configuration error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Completion base URL is blank
    #[error("Completion base_url cannot be empty")]
    EmptyBaseUrl,

    /// Default swarm size is zero or above the ceiling
    #[error("Invalid swarm default_size: {0}. Must be between 1 and {max}", max = MAX_SWARM_SIZE)]
    InvalidSwarmSize(usize),

    /// Concurrency limit of zero
    #[error("Invalid swarm max_in_flight: {0}. Must be at least 1 or unset")]
    InvalidMaxInFlight(usize),

    /// Request timeout of zero
    #[error("Invalid completion timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    /// Unknown log level
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Unknown console log format
    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    /// Unknown rotation policy
    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    /// Port zero
    #[error("Invalid server port: {0}. Must be non-zero")]
    InvalidPort(u16),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration relative to the working directory
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .shame/config.yaml
    /// 3. .shame/local.yaml (optional local overrides)
    /// 4. Environment variables (SHAME_* prefix, `__` between nested keys)
    pub fn load() -> Result<Config> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration with `root` standing in for the working directory
    pub fn load_from(root: impl AsRef<Path>) -> Result<Config> {
        let dir = root.as_ref().join(CONFIG_DIR);
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.completion.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.completion.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.completion.timeout_secs));
        }

        if config.swarm.default_size == 0 || config.swarm.default_size > MAX_SWARM_SIZE {
            return Err(ConfigError::InvalidSwarmSize(config.swarm.default_size));
        }

        if config.swarm.max_in_flight == Some(0) {
            return Err(ConfigError::InvalidMaxInFlight(0));
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort(config.server.port));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }
}
