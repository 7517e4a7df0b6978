use axum::extract::State;
use axum::{routing::get, Json, Router};
use jobstore_core::repository::JobRepository;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the job store answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    /// Storage engine behind the job repository (`postgres` or `memory`).
    pub store: &'static str,
    pub store_healthy: bool,
    /// Why the store check failed; omitted when healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_error: Option<String>,
}

/// GET /health -- checks the job store with a round-trip.
///
/// Always answers 200 so load balancers can read the payload; callers
/// decide on `status`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.jobs.backend();
    let store_error = match state.jobs.health_check().await {
        Ok(()) => None,
        Err(err) => {
            tracing::warn!(store, error = %err, "Job store health check failed");
            Some(err.to_string())
        }
    };
    let store_healthy = store_error.is_none();

    Json(HealthResponse {
        status: if store_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store,
        store_healthy,
        store_error,
    })
}

/// Mount health check routes (root level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
