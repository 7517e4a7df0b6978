pub mod health;
pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /jobs                        POST create
/// /jobs/count                  GET count
/// /jobs/{id}                   GET, PUT, DELETE
/// /jobs/uuid/{uuid}            GET by uuid
/// /jobs/uuid/{uuid}/exists     GET existence check
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/jobs", jobs::router())
}
