use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jobstore_core::error::DataAccessError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`DataAccessError`] from the repository and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure reported by the job repository.
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),

    /// A lookup found nothing. Reads report absence as `None`; handlers turn
    /// it into this variant.
    #[error("Job not found: {0}")]
    NotFound(String),

    /// The request could not be decoded (bad path segment, malformed body).
    #[error("Bad request: {message}")]
    BadRequest { status: StatusCode, message: String },
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::DataAccess(err) => classify_data_access_error(err),
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Job {what} not found"),
            ),
            AppError::BadRequest { status, message } => {
                (*status, "BAD_REQUEST", message.clone())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a repository error into an HTTP status, error code, and message.
///
/// - uuid conflicts (duplicate or attempted change) map to 409.
/// - An update of a vanished job maps to 404.
/// - Storage-shape violations map to 400.
/// - Store failures map to 500 with a sanitized message.
fn classify_data_access_error(err: &DataAccessError) -> (StatusCode, &'static str, String) {
    match err {
        DataAccessError::DuplicateUuid { .. } | DataAccessError::UuidImmutable { .. } => {
            (StatusCode::CONFLICT, "CONFLICT", err.to_string())
        }
        DataAccessError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        DataAccessError::Invalid(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        DataAccessError::Store { .. } => {
            tracing::error!(error = %err, "Job store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_uuid_is_conflict() {
        let err = AppError::from(DataAccessError::DuplicateUuid {
            uuid: "dup".into(),
        });
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn store_failure_is_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = AppError::from(DataAccessError::store("save", io));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn request_rejection_keeps_its_status() {
        let err = AppError::BadRequest {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "Expected request with `Content-Type: application/json`".into(),
        };
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[test]
    fn invalid_is_bad_request() {
        let err = AppError::from(DataAccessError::Invalid("name too long".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
