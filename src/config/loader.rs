//! Configuration loading
//!
//! Precedence order (highest to lowest):
//! 1. Command line flags (applied by the caller)
//! 2. Environment variable overrides
//! 3. Config file
//! 4. Built-in defaults

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable forcing read-only mode on or off
pub const READ_ONLY_ENV: &str = "FLUXCLI_READ_ONLY";
/// Environment variable overriding the starting namespace
pub const NAMESPACE_ENV: &str = "FLUXCLI_NAMESPACE";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Config> {
        let path = paths::root_config_path();
        let config = if path.exists() {
            Self::load_file(&path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load and check the config file without starting anything
    pub fn validate() -> Result<Config> {
        let config = Self::load().context("Failed to load configuration")?;

        if config.kind().is_none() {
            return Err(anyhow::anyhow!(
                "defaultKind '{}' is not a known Flux kind",
                config.default_kind
            ));
        }
        if config.ui.columns_name == 0 || config.ui.columns_status == 0 {
            return Err(anyhow::anyhow!("ui column widths must be greater than 0"));
        }

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(config: Config) -> Config {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`
    pub fn apply_overrides<F>(mut config: Config, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(read_only) = lookup(READ_ONLY_ENV) {
            match read_only.parse::<bool>() {
                Ok(val) => config.read_only = val,
                Err(_) => tracing::warn!("Ignoring {}={}", READ_ONLY_ENV, read_only),
            }
        }

        if let Some(namespace) = lookup(NAMESPACE_ENV) {
            config.default_namespace = namespace;
        }

        config
    }
}
