//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (dataset can be opened)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::query;
use crate::store::DatasetSummary;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 if a read-only session can be opened and queried.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match check_store(&state).await {
        Some(_) => StatusCode::OK,
        None => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with dataset details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = check_store(&state).await;

    let (status, store) = if dataset.is_some() {
        ("healthy", "ok")
    } else {
        ("unhealthy", "error")
    };

    Json(HealthResponse {
        status: status.to_string(),
        store: store.to_string(),
        dataset,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Summarize the dataset, `None` if the store cannot be read
async fn check_store(state: &AppState) -> Option<DatasetSummary> {
    match state.query(|store| query::summary(store)).await {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            None
        }
    }
}
