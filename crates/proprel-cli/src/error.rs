//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus could not be loaded or indexed
    #[error(transparent)]
    Store(#[from] proprel_store::StoreError),

    /// Engine error
    #[error(transparent)]
    Engine(#[from] proprel_engine::EngineError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No corpus given on the command line, in the config, or in the environment
    #[error("No corpus given. Use --corpus, set corpus_path in the config, or set PROPREL_CORPUS.")]
    NoCorpus,
}
