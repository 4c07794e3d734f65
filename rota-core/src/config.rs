//! Configuration management for Reviewer Rota
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (ROTA_*)
//! 3. Config file (~/.config/rota/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// SQLite storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,

    /// Maximum number of pooled connections
    pub max_connections: u32,

    /// How long a writer waits for a locked database
    #[serde(with = "humantime_serde")]
    pub busy_timeout: Duration,

    /// How long to wait for a free pooled connection
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rota")
            .join("rota.db");

        Self {
            path,
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, e.g. `0.0.0.0:8080`
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/rota/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rota").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - ROTA_DATABASE: Path to the SQLite database
    /// - ROTA_BIND: Server bind address
    /// - ROTA_MAX_CONNECTIONS: Pool size
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(path) = var("ROTA_DATABASE") {
            self.database.path = PathBuf::from(path);
        }

        if let Some(bind) = var("ROTA_BIND") {
            self.server.bind = bind;
        }

        if let Some(max) = var("ROTA_MAX_CONNECTIONS") {
            self.database.max_connections = max.parse().map_err(|_| {
                Error::Config(format!("ROTA_MAX_CONNECTIONS must be a number, got '{max}'"))
            })?;
        }

        Ok(self)
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, database: Option<PathBuf>, bind: Option<String>) -> Self {
        if let Some(path) = database {
            self.database.path = path;
        }

        if let Some(bind) = bind {
            self.server.bind = bind;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults. An explicit
    /// `config_file` replaces the default location and must exist.
    pub fn load_with_overrides(
        config_file: Option<&Path>,
        database: Option<PathBuf>,
        bind: Option<String>,
    ) -> Result<Self> {
        let base = match config_file {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };
        Ok(base
            .with_env_overrides()?
            .with_cli_overrides(database, bind))
    }
}
