//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use club_service::{ApiResponse, HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// GET /health: process is up.
pub async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::new(HealthResponse::healthy()))
}

/// GET /health/ready: process can reach its database. Returns 503 with
/// the same body shape when it cannot, so orchestrators and humans see
/// the same detail.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_healthy = state.service_context().pool().acquire().await.is_ok();
    let status = if database_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::new(ReadinessResponse::ready(database_healthy))),
    )
}
