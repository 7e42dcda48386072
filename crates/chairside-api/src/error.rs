//! Error type shared by every handler.
//!
//! Storage failures already carry a failure class ([`DbError`]); this
//! module maps each class onto an HTTP status and wraps the message in
//! the failure envelope the clients expect:
//!
//! ```json
//! { "success": false, "error": "Not found: patient abc" }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use chairside_core::DbError;

pub type ApiResult<T> = Result<T, ApiError>;

/// A failed request, carrying the message the client will see.
#[derive(Debug)]
pub enum ApiError {
    /// 404: the addressed row does not exist.
    NotFound(String),
    /// 409: storage rejected the write (duplicate id, broken reference).
    Conflict(String),
    /// 422: the payload parsed but a value in it is unusable.
    Validation(String),
    /// 400: the request body is not valid JSON for the endpoint.
    BadRequest(String),
    /// 500: anything the server cannot blame on the caller.
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> String {
        match self {
            ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Validation(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let message = err.to_string();
        match err {
            DbError::NotFound(_) => ApiError::NotFound(message),
            DbError::Constraint(_) => ApiError::Conflict(message),
            DbError::Validation(_) => ApiError::Validation(message),
            DbError::Sqlite(_) => ApiError::Internal(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Failure envelope body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            tracing::error!("request failed: {message}");
        }
        let body = ErrorBody {
            success: false,
            error: message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_statuses() {
        let cases = [
            (DbError::NotFound("patient x".into()), StatusCode::NOT_FOUND),
            (
                DbError::Constraint("duplicate id".into()),
                StatusCode::CONFLICT,
            ),
            (
                DbError::Validation("bad date".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (err, expected) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status(), expected);
        }
    }

    #[test]
    fn test_message_keeps_storage_prefix() {
        let api: ApiError = DbError::NotFound("patient abc".into()).into();
        assert_eq!(api.message(), "Not found: patient abc");
    }
}
