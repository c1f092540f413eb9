//! Health and metrics endpoints.

use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;

use super::{ApiError, AppState, HealthResponse};

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `GET /api/metrics`
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
