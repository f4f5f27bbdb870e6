//! Store error types

use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// No corpus snapshot has been published yet
    #[error("Relationship corpus is not loaded")]
    CorpusUnavailable,

    /// Material type has no registered corpus
    #[error("No relationship corpus for material type: {0}")]
    NotFound(String),

    /// Failed to read a corpus file or directory
    #[error("Failed to read corpus at {path}: {source}")]
    Io {
        /// Path that could not be read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Corpus file is not valid JSON/TOML
    #[error("Failed to parse corpus file {path}: {message}")]
    Parse {
        /// File that failed to parse
        path: String,
        /// Parser message
        message: String,
    },

    /// A rule failed validation while building the index
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
