//! Application error taxonomy and its HTTP rendering.
//!
//! Every layer returns [`AppError`]. The edge converts it into a JSON body of
//! the form `{"error": {"code", "message", "details"}}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::is_short_name_conflict;

/// Non-standard status used when the caller abandoned the request.
const CLIENT_CLOSED_REQUEST: u16 = 499;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid url")]
    InvalidUrl,

    #[error("invalid short_name")]
    InvalidShortName,

    #[error("invalid sort")]
    InvalidSort,

    #[error("invalid range")]
    InvalidRange,

    /// Malformed request input caught before it reaches the service.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("not found")]
    NotFound,

    #[error("short_name already exists")]
    ShortNameConflict,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("request canceled")]
    Canceled,

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Prefixes an internal failure with the operation that produced it.
    ///
    /// Every other kind passes through unchanged so callers can still match on it.
    pub fn context(self, operation: &str) -> Self {
        match self {
            Self::Internal { message, details } => Self::Internal {
                message: format!("{operation}: {message}"),
                details,
            },
            other => other,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ShortNameConflict)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl
            | Self::InvalidShortName
            | Self::InvalidSort
            | Self::InvalidRange
            | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ShortNameConflict => StatusCode::CONFLICT,
            Self::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
            Self::Canceled => StatusCode::from_u16(CLIENT_CLOSED_REQUEST)
                .unwrap_or(StatusCode::SERVICE_UNAVAILABLE),
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its wire payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            Self::InvalidUrl => ("validation_error", json!({ "field": "original_url" })),
            Self::InvalidShortName => ("validation_error", json!({ "field": "short_name" })),
            Self::InvalidSort => ("validation_error", json!({ "field": "sort" })),
            Self::InvalidRange => ("validation_error", json!({ "field": "range" })),
            Self::Validation { details, .. } => ("validation_error", details.clone()),
            Self::NotFound => ("not_found", json!({})),
            Self::ShortNameConflict => ("conflict", json!({ "field": "short_name" })),
            Self::DeadlineExceeded => ("timeout", json!({})),
            Self::Canceled => ("canceled", json!({})),
            Self::Internal { details, .. } => ("internal_error", details.clone()),
        };

        ErrorInfo {
            code,
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let Self::Internal { message, .. } = &self {
            tracing::error!(error = %message, "Request failed with internal error");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_short_name_conflict(&e) {
            return Self::ShortNameConflict;
        }

        match e {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::PoolTimedOut => Self::DeadlineExceeded,
            sqlx::Error::PoolClosed => Self::Canceled,
            other => {
                tracing::debug!(error = ?other, "Database error");
                Self::internal("database error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::bad_request("validation failed", json!(errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("invalid json", json!({ "reason": rejection.body_text() }))
    }
}

impl From<getrandom::Error> for AppError {
    fn from(e: getrandom::Error) -> Self {
        Self::internal("entropy source failure", json!({ "reason": e.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidUrl.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidShortName.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::InvalidSort.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidRange.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::ShortNameConflict.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::DeadlineExceeded.status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(AppError::Canceled.status_code().as_u16(), 499);
        assert_eq!(
            AppError::internal("boom", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_context_prefixes_internal_message() {
        let err = AppError::internal("database error", json!({})).context("links list page");
        assert_eq!(err.to_string(), "links list page: database error");
    }

    #[test]
    fn test_context_keeps_kind() {
        assert!(matches!(
            AppError::NotFound.context("links get"),
            AppError::NotFound
        ));
        assert!(
            AppError::ShortNameConflict
                .context("links create")
                .is_conflict()
        );
        assert!(matches!(
            AppError::DeadlineExceeded.context("links count"),
            AppError::DeadlineExceeded
        ));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            AppError::from(sqlx::Error::RowNotFound),
            AppError::NotFound
        ));
    }

    #[test]
    fn test_pool_errors_map_to_deadline_and_cancel() {
        assert!(matches!(
            AppError::from(sqlx::Error::PoolTimedOut),
            AppError::DeadlineExceeded
        ));
        assert!(matches!(
            AppError::from(sqlx::Error::PoolClosed),
            AppError::Canceled
        ));
    }

    #[test]
    fn test_error_info_codes() {
        assert_eq!(AppError::InvalidSort.to_error_info().code, "validation_error");
        assert_eq!(AppError::NotFound.to_error_info().code, "not_found");
        assert_eq!(AppError::ShortNameConflict.to_error_info().code, "conflict");
        assert_eq!(AppError::DeadlineExceeded.to_error_info().code, "timeout");
        assert_eq!(AppError::Canceled.to_error_info().code, "canceled");
        assert_eq!(
            AppError::ShortNameConflict.to_error_info().message,
            "short_name already exists"
        );
    }

    #[tokio::test]
    async fn test_into_response_body_shape() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"]["code"], "not_found");
        assert_eq!(body["error"]["message"], "not found");
    }
}
