use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted under `/api/v1/jobs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(jobs::create))
        .route("/count", get(jobs::count))
        .route(
            "/{id}",
            get(jobs::get_by_id).put(jobs::update).delete(jobs::delete),
        )
        .route("/uuid/{uuid}", get(jobs::get_by_uuid))
        .route("/uuid/{uuid}/exists", get(jobs::exists_by_uuid))
}
