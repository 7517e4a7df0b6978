//! Handlers for the `/jobs` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use jobstore_core::job::JobData;
use jobstore_core::repository::JobRepository;
use jobstore_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiPath};
use crate::response::{CountResponse, DataResponse, ExistsResponse};
use crate::state::AppState;

/// GET /api/v1/jobs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<JobData>>> {
    let job = state
        .jobs
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("with id {id}")))?;
    Ok(Json(DataResponse { data: job }))
}

/// GET /api/v1/jobs/uuid/{uuid}
pub async fn get_by_uuid(
    State(state): State<AppState>,
    ApiPath(uuid): ApiPath<String>,
) -> AppResult<Json<DataResponse<JobData>>> {
    let job = state
        .jobs
        .find_by_uuid(&uuid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("with uuid {uuid}")))?;
    Ok(Json(DataResponse { data: job }))
}

/// GET /api/v1/jobs/uuid/{uuid}/exists
pub async fn exists_by_uuid(
    State(state): State<AppState>,
    ApiPath(uuid): ApiPath<String>,
) -> AppResult<Json<DataResponse<ExistsResponse>>> {
    let exists = state.jobs.exists_by_uuid(&uuid).await?;
    Ok(Json(DataResponse {
        data: ExistsResponse { exists },
    }))
}

/// GET /api/v1/jobs/count
pub async fn count(State(state): State<AppState>) -> AppResult<Json<DataResponse<CountResponse>>> {
    let count = state.jobs.count().await?;
    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

/// POST /api/v1/jobs
///
/// Always creates; an `id` in the body is ignored.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(mut input): ApiJson<JobData>,
) -> AppResult<(StatusCode, Json<DataResponse<JobData>>)> {
    input.id = None;
    let job = state.jobs.save(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}

/// PUT /api/v1/jobs/{id}
///
/// Full replacement keyed by the path id.
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(mut input): ApiJson<JobData>,
) -> AppResult<Json<DataResponse<JobData>>> {
    input.id = Some(id);
    let job = state.jobs.save(input).await?;
    Ok(Json(DataResponse { data: job }))
}

/// DELETE /api/v1/jobs/{id}
///
/// Deleting a job that is already gone also answers 204.
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    state.jobs.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
