//! Proprel Server
//!
//! HTTP surface of the property relationship engine. Serves the validate and
//! recommend contracts to the admin UI, plus health and corpus reload routes.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod wire;

use config::ServerConfig;
use handlers::{create_router, AppState};
use proprel_engine::{EngineError, ValidationOrchestrator};
use proprel_store::RelationshipStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Engine could not be built
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the application state for `config`
///
/// The configured corpus is loaded once. A corpus that fails to load is
/// logged and the service starts degraded, answering `success=false` until a
/// reload succeeds.
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let store = Arc::new(RelationshipStore::new());

    match &config.corpus_path {
        Some(path) => match store.reload_from_path(path) {
            Ok(stats) => info!(
                "Loaded {} relationship(s) for {} material type(s) from {}",
                stats.relationship_count,
                stats.materials.len(),
                path.display()
            ),
            Err(e) => warn!("Starting without a corpus: {}", e),
        },
        None => warn!("No corpus path configured; starting without a corpus"),
    }

    let orchestrator = ValidationOrchestrator::new(store, config.engine.clone())?;
    Ok(AppState::new(
        Arc::new(orchestrator),
        config.corpus_path.clone(),
    ))
}

/// Start the HTTP server
///
/// Loads the corpus, builds the orchestrator, and starts the axum server.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Proprel server");
    info!("Bind address: {}", config.bind_addr());

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
