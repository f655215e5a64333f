//! Configuration loading and resolution
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument or its environment variable
//! 2. TOML config file
//! 3. Compiled default

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the song collection lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// Private in-memory database, gone when the process exits
    Memory,
    File(PathBuf),
}

impl DatabaseLocation {
    /// `:memory:` selects the in-memory store, anything else is a file path
    pub fn parse(value: &str) -> Self {
        if value == ":memory:" {
            DatabaseLocation::Memory
        } else {
            DatabaseLocation::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for DatabaseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseLocation::Memory => write!(f, ":memory:"),
            DatabaseLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Compiled fallback values
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub port: u16,
    pub database: DatabaseLocation,
    pub dataset: PathBuf,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            port: 8080,
            database: DatabaseLocation::File(default_database_path()),
            dataset: PathBuf::from("data/top-music.json"),
            log_level: "info".to_string(),
        }
    }
}

/// OS-dependent default database path
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("topmusic").join("songs.db"))
        .unwrap_or_else(|| PathBuf::from("./topmusic_data/songs.db"))
}

/// Logging section of the TOML config
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// Contents of the TOML config file; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub database: Option<String>,
    pub dataset: Option<PathBuf>,
    pub reset_db: Option<bool>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the TOML config was obtained, for startup logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// No config file was requested
    NotRequested,
    /// Loaded from this file
    File(PathBuf),
    /// Requested but absent; defaults were used
    Missing(PathBuf),
}

impl TomlConfig {
    /// Parse a config file; a missing file is an error here
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load an optional config file
    ///
    /// A missing file degrades to defaults; a file that exists but does not
    /// parse is an error.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let Some(path) = path else {
            return Ok((Self::default(), ConfigSource::NotRequested));
        };

        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Missing(path.to_path_buf())));
        }

        let config = Self::from_file(path).map_err(|e| {
            Error::Config(format!("Failed to load {}: {}", path.display(), e))
        })?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }
}

/// Highest-priority values, from the command line or environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub database: Option<String>,
    pub dataset: Option<PathBuf>,
    pub reset_db: Option<bool>,
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    pub database: DatabaseLocation,
    pub dataset: PathBuf,
    /// Clear and reseed the collection from `dataset` at startup
    pub reset_db: bool,
    pub log_level: String,
}

impl ServiceConfig {
    pub fn resolve(
        overrides: ConfigOverrides,
        toml: TomlConfig,
        defaults: CompiledDefaults,
    ) -> Self {
        Self {
            port: overrides.port.or(toml.port).unwrap_or(defaults.port),
            database: overrides
                .database
                .or(toml.database)
                .map(|d| DatabaseLocation::parse(&d))
                .unwrap_or(defaults.database),
            dataset: overrides
                .dataset
                .or(toml.dataset)
                .unwrap_or(defaults.dataset),
            reset_db: overrides.reset_db.or(toml.reset_db).unwrap_or(false),
            log_level: overrides
                .log_level
                .or(toml.logging.level)
                .unwrap_or(defaults.log_level),
        }
    }
}
