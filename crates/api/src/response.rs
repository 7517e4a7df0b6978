//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Payload of `GET /api/v1/jobs/uuid/{uuid}/exists`.
#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Payload of `GET /api/v1/jobs/count`.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}
