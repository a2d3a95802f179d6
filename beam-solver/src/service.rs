//! HTTP service exposing validation and analysis

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::analysis::{run_analysis, AnalysisOptions};
use crate::backend::wire::{AnalysisResponse, HealthResponse, ValidationResponse};
use crate::backend::{AnalysisBackend, StiffnessBackend};
use crate::error::{AnalysisError, BeamError};
use crate::model::BeamInput;
use crate::validation;

type SharedBackend = Arc<dyn AnalysisBackend>;

/// Router backed by the in-process stiffness backend
pub fn router(options: AnalysisOptions) -> Router {
    router_with_backend(Arc::new(StiffnessBackend::new(options)))
}

/// Router that hands analyses to `backend`
pub fn router_with_backend(backend: SharedBackend) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/v1/validate", post(validate))
        .route("/api/v1/analyze", post(analyze))
        .layer(cors)
        .with_state(backend)
}

/// Status code for a failed analysis
pub fn status_for(error: &BeamError) -> StatusCode {
    match error {
        BeamError::Validation(_) | BeamError::Analysis(AnalysisError::SolverDivergence { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        BeamError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn validate(Json(input): Json<BeamInput>) -> impl IntoResponse {
    let response = ValidationResponse::from(validation::validate_all(&input));
    let status = if response.valid {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(response))
}

async fn analyze(
    State(backend): State<SharedBackend>,
    Json(input): Json<BeamInput>,
) -> impl IntoResponse {
    // Backends may block (the remote client does), keep them off the async workers
    let outcome = tokio::task::spawn_blocking(move || run_analysis(&input, backend.as_ref()))
        .await
        .unwrap_or_else(|e| {
            Err(AnalysisError::UnknownBackendFailure {
                diagnostic: format!("analysis task failed: {}", e),
            }
            .into())
        });

    match outcome {
        Ok(analysis) => (
            StatusCode::OK,
            Json(AnalysisResponse::success(analysis.model, analysis.result)),
        ),
        Err(e) => (status_for(&e), Json(AnalysisResponse::failure(&e))),
    }
}
