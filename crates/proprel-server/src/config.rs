//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files: bind address, corpus location, and the
//! engine's scoring weights.

use proprel_engine::EngineConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a corpus file or directory
pub const CORPUS_ENV_VAR: &str = "PROPREL_CORPUS";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Values that parse but cannot be used
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Corpus file or directory loaded at startup and on reload
    #[serde(default)]
    pub corpus_path: Option<PathBuf>,

    /// Scoring weights and suggestion policy
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            corpus_path: None,
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(contents)?;

        if config.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_address is empty".to_string()));
        }
        config
            .engine
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(config)
    }

    /// Fill in the corpus path from `PROPREL_CORPUS` when the file named none
    pub fn with_env_overrides(self) -> Self {
        self.with_corpus_fallback(std::env::var_os(CORPUS_ENV_VAR).map(PathBuf::from))
    }

    fn with_corpus_fallback(mut self, fallback: Option<PathBuf>) -> Self {
        if self.corpus_path.is_none() {
            self.corpus_path = fallback.filter(|path| !path.as_os_str().is_empty());
        }
        self
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
