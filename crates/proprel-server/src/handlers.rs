//! HTTP request handlers for the engine service.
//!
//! Implements the validate/recommend contracts plus health and corpus
//! administration endpoints using axum. Every fault is answered with the
//! `{success: false, error}` envelope.

use crate::wire::{
    assignment_from_json, ApiResponse, CorpusStatsDto, RecommendRequest, RecommendResultDto,
    ValidateRequest, ValidationResultDto,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use proprel_engine::{EngineError, ValidationOrchestrator};
use proprel_store::StoreError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Orchestrator over the shared relationship store
    pub orchestrator: Arc<ValidationOrchestrator>,
    /// Corpus location re-read by `POST /corpus/reload`
    pub corpus_path: Option<Arc<PathBuf>>,
}

impl AppState {
    /// Create state for an orchestrator and an optional reload source
    pub fn new(orchestrator: Arc<ValidationOrchestrator>, corpus_path: Option<PathBuf>) -> Self {
        Self {
            orchestrator,
            corpus_path: corpus_path.map(Arc::new),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// `healthy` with a loaded corpus, `degraded` otherwise
    pub status: String,
    /// Whether a corpus snapshot is published
    pub corpus_loaded: bool,
    /// Version of the published snapshot
    pub corpus_version: Option<u64>,
    /// Number of material types with rules
    pub material_types: usize,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Body could not be read as the expected JSON; carries the
    /// extractor's status (400, 413, 415, 422)
    Rejected(StatusCode, String),
    /// Engine-level failure
    Engine(EngineError),
    /// Corpus reload failed; the previous snapshot is still serving
    Reload(StoreError),
    /// Reload requested but no corpus location is configured
    NoCorpusPath,
    /// Internal server error
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Rejected(status, msg) => (status, msg),
            AppError::Engine(e @ EngineError::CorpusUnavailable) => {
                (StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            }
            AppError::Engine(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Reload(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            AppError::NoCorpusPath => (
                StatusCode::CONFLICT,
                "No corpus path configured".to_string(),
            ),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            error!("Request failed: {}", message);
        } else {
            warn!("Request rejected: {}", message);
        }

        let body = Json(ApiResponse::<()>::failure(message));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl From<EngineError> for AppError {
    fn from(e: EngineError) -> Self {
        AppError::Engine(e)
    }
}

/// POST /validate - Check an assignment and suggest improvements
async fn validate(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ValidationResultDto>>, AppError> {
    let Json(request) = payload?;
    let assignment = assignment_from_json(&request.properties);
    debug!(
        "validate '{}' with {} propert(ies)",
        request.material_type,
        assignment.len()
    );

    let result = state
        .orchestrator
        .validate(&request.material_type, &assignment)?;

    Ok(Json(ApiResponse::ok(ValidationResultDto::from(&result))))
}

/// POST /recommend - Rank values for one property
async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RecommendResultDto>>, AppError> {
    let Json(request) = payload?;
    let assignment = assignment_from_json(&request.properties);
    debug!(
        "recommend '{}' for '{}' with {} propert(ies)",
        request.material_type,
        request.target_property,
        assignment.len()
    );

    let recommendations = state.orchestrator.recommend(
        &request.material_type,
        &assignment,
        &request.target_property,
    )?;

    Ok(Json(ApiResponse::ok(RecommendResultDto::from(
        recommendations.as_slice(),
    ))))
}

/// GET /health - Service and corpus status
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let stats = state.orchestrator.store().stats();

    let response = match stats {
        Some(stats) => HealthCheckResponse {
            status: "healthy".to_string(),
            corpus_loaded: true,
            corpus_version: Some(stats.version),
            material_types: stats.materials.len(),
        },
        None => HealthCheckResponse {
            status: "degraded".to_string(),
            corpus_loaded: false,
            corpus_version: None,
            material_types: 0,
        },
    };

    Json(response)
}

/// GET /corpus - Figures of the published snapshot
async fn corpus_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CorpusStatsDto>>, AppError> {
    let stats = state
        .orchestrator
        .store()
        .stats()
        .ok_or(AppError::Engine(EngineError::CorpusUnavailable))?;

    Ok(Json(ApiResponse::ok(CorpusStatsDto::from(&stats))))
}

/// POST /corpus/reload - Re-read the configured corpus and swap it in
async fn reload_corpus(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CorpusStatsDto>>, AppError> {
    let path = state.corpus_path.clone().ok_or(AppError::NoCorpusPath)?;
    let store = Arc::clone(state.orchestrator.store());

    info!("Reloading corpus from {}", path.display());
    let stats = tokio::task::spawn_blocking(move || store.reload_from_path(path.as_path()))
        .await
        .map_err(|e| AppError::InternalError(format!("Reload task failed: {}", e)))?
        .map_err(AppError::Reload)?;

    Ok(Json(ApiResponse::ok(CorpusStatsDto::from(&stats))))
}

/// Create the axum router with all endpoints
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/validate", post(validate))
        .route("/recommend", post(recommend))
        .route("/health", get(health_check))
        .route("/corpus", get(corpus_stats))
        .route("/corpus/reload", post(reload_corpus))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use proprel_engine::EngineConfig;
    use proprel_store::RelationshipStore;

    fn unloaded_state() -> AppState {
        let store = Arc::new(RelationshipStore::new());
        let orchestrator = ValidationOrchestrator::new(store, EngineConfig::default()).unwrap();
        AppState::new(Arc::new(orchestrator), None)
    }

    #[test]
    fn test_create_router() {
        let _router = create_router(unloaded_state());
    }

    #[tokio::test]
    async fn test_unavailable_corpus_maps_to_503() {
        let response = AppError::Engine(EngineError::CorpusUnavailable).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let envelope: ApiResponse<()> = serde_json::from_slice(&body).unwrap();
        assert!(!envelope.success);
        assert!(envelope.error.is_some());
    }

    #[tokio::test]
    async fn test_rejection_keeps_its_status() {
        let response =
            AppError::Rejected(StatusCode::PAYLOAD_TOO_LARGE, "Body too large".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let envelope: ApiResponse<()> = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope.error.as_deref(), Some("Body too large"));
    }

    #[tokio::test]
    async fn test_health_without_corpus_is_degraded() {
        let Json(health) = health_check(State(unloaded_state())).await;
        assert_eq!(health.status, "degraded");
        assert!(!health.corpus_loaded);
        assert_eq!(health.corpus_version, None);
    }

    #[tokio::test]
    async fn test_reload_without_path() {
        let err = reload_corpus(State(unloaded_state())).await.unwrap_err();
        assert!(matches!(err, AppError::NoCorpusPath));
    }
}
