//! Configuration management for hashchain

use crate::error::{ChainError, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "hashchain.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExportConfig {
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// Write the export here instead of stdout.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            path: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DemoConfig {
    /// Payloads appended after the genesis block.
    #[serde(default = "default_payloads")]
    pub payloads: Vec<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            payloads: default_payloads(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_payloads() -> Vec<String> {
    vec!["Block 1 Data".to_string(), "Block 2 Data".to_string()]
}

/// Parse and validate a TOML document.
pub fn load_config_from_str(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;

    if config.logging.level.trim().is_empty() {
        return Err(ChainError::ConfigError("logging.level must not be empty".to_string()));
    }

    Ok(config)
}

/// Load the config at `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    match fs::read_to_string(path) {
        Ok(config_str) => load_config_from_str(&config_str),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e.into()),
    }
}
