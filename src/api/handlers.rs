//! HTTP handlers for the status API.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/sync", post(sync_handler))
        .with_state(state)
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Handler for GET /status: the report of the last finished pass.
async fn status_handler(State(state): State<AppState>) -> Response {
    match state.service().last_report().await {
        Some(report) => (StatusCode::OK, Json(report)).into_response(),
        None => ApiErrorResponse::new(StatusCode::NOT_FOUND, ApiError::no_pass_yet()).into_response(),
    }
}

/// Handler for POST /sync: runs a pass now unless one is already running.
async fn sync_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Manual sync requested");

    match state.service().try_run_pass().await {
        Some(report) => {
            info!(
                correlation_id = %correlation_id,
                pass_id = %report.pass_id,
                failed = report.outcome.is_failed(),
                "Manual sync finished"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        None => {
            warn!(correlation_id = %correlation_id, "Manual sync rejected, pass in progress");
            ApiErrorResponse::new(StatusCode::CONFLICT, ApiError::pass_in_progress()).into_response()
        }
    }
}
