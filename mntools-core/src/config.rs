//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/mntools/config.toml`. Every value
//! has a default, so a missing file yields the stock behaviour: dump
//! `./data/mindnoscape.db` and count `.go` files under `.`.
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/mntools/` (~/.config/mntools/)
//! - State/Logs: `$XDG_STATE_HOME/mntools/` (~/.local/state/mntools/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Database dumper settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Line counter settings
    #[serde(default)]
    pub linecount: LineCountConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Location of the database the dumper reads.
///
/// Split into directory and file name the same way the Mindnoscape app
/// stores it, so both tools agree on where `mindnoscape.db` lives.
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding the database file
    #[serde(default = "default_database_dir")]
    pub dir: PathBuf,

    /// Database file name inside `dir`
    #[serde(default = "default_database_file")]
    pub file: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dir: default_database_dir(),
            file: default_database_file(),
        }
    }
}

impl DatabaseConfig {
    /// Full path of the database file
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

fn default_database_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_database_file() -> String {
    "mindnoscape.db".to_string()
}

/// Line counter configuration
#[derive(Debug, Deserialize)]
pub struct LineCountConfig {
    /// Traversal root
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// File name suffix to match (a leading dot is added when missing)
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Language label used in the summary lines
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for LineCountConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
            label: default_label(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_extension() -> String {
    ".go".to_string()
}

fn default_label() -> String {
    "Go".to_string()
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
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

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration, returning an error for unusable values
    pub fn validate(&self) -> Result<()> {
        if self.database.file.trim().is_empty() {
            return Err(Error::Config("database.file must not be empty".to_string()));
        }
        if self.linecount.extension.trim_start_matches('.').is_empty() {
            return Err(Error::Config("linecount.extension must not be empty".to_string()));
        }
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/mntools/config.toml` (~/.config/mntools/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("mntools").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/mntools/` (~/.local/state/mntools/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("mntools")
    }
}
