//! Engine error types

use proprel_store::StoreError;
use thiserror::Error;

/// Errors that can occur while serving a validate/recommend request
#[derive(Error, Debug)]
pub enum EngineError {
    /// The store has no corpus yet; the request cannot be answered
    #[error("Relationship corpus is not loaded")]
    CorpusUnavailable,

    /// Store failure other than an unknown material type
    #[error("Store error: {0}")]
    Store(StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::CorpusUnavailable => EngineError::CorpusUnavailable,
            other => EngineError::Store(other),
        }
    }
}
