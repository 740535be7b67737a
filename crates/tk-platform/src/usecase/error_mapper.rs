//! Error Mapper
//!
//! Pure translation from a domain error (or an uncaught generic error) to an
//! HTTP status and a normalized error body. This module must not log, mutate
//! state, or retry — logging is the caller's responsibility.

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::error::DomainError;

/// Transport-ready failure: status code plus normalized body.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

/// Wire shape of every failure response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    /// Machine-stable code, safe to switch on
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Open details bag
    pub details: HashMap<String, serde_json::Value>,

    /// When the mapping happened (ISO-8601)
    pub timestamp: DateTime<Utc>,

    /// The request id the operation was invoked with
    pub request_id: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Stateless mapping functions.
pub struct ErrorMapper;

impl ErrorMapper {
    /// HTTP status for a domain error kind.
    ///
    /// The mapping is fixed per kind; kinds without a dedicated row fall to
    /// 500.
    pub fn http_status(error: &DomainError) -> StatusCode {
        match error {
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Conflict { .. } => StatusCode::CONFLICT,
            DomainError::BusinessRule { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Infrastructure { .. } | DomainError::Aborted { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Map a domain error to its transport shape.
    ///
    /// The body code is always the error's own stable code, so an abort
    /// surfaces as `ABORTED` and is never merged into the infrastructure
    /// bucket even though both map to a 500 status.
    pub fn to_http_error(error: &DomainError, request_id: &str) -> HttpError {
        HttpError {
            status: Self::http_status(error),
            body: ErrorBody {
                error: ErrorDetail {
                    code: error.code().to_string(),
                    message: error.message(),
                    details: error.details(),
                    timestamp: Utc::now(),
                    request_id: request_id.to_string(),
                },
            },
        }
    }

    /// Map an uncaught generic error.
    ///
    /// Always 500 / `INTERNAL_SERVER_ERROR`, whatever the concrete error
    /// type; the original message is preserved in the details bag.
    pub fn from_generic_error(error: &dyn std::error::Error, request_id: &str) -> HttpError {
        let mut details = HashMap::new();
        details.insert(
            "originalMessage".to_string(),
            serde_json::json!(error.to_string()),
        );

        HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: ErrorDetail {
                    code: "INTERNAL_SERVER_ERROR".to_string(),
                    message: "An unexpected error occurred".to_string(),
                    details,
                    timestamp: Utc::now(),
                    request_id: request_id.to_string(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::unauthorized("read"), StatusCode::UNAUTHORIZED),
            (DomainError::not_found("User", "u1"), StatusCode::NOT_FOUND),
            (DomainError::conflict("User", "alice"), StatusCode::CONFLICT),
            (
                DomainError::business_rule("owner cannot leave"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DomainError::infrastructure("db down"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::aborted("duplicate"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(ErrorMapper::http_status(&error), expected, "{:?}", error);
        }
    }

    #[test]
    fn test_to_http_error_body() {
        let error = DomainError::not_found("User", "missing");
        let mapped = ErrorMapper::to_http_error(&error, "req-42");

        assert_eq!(mapped.status, StatusCode::NOT_FOUND);
        assert_eq!(mapped.body.error.code, "NOT_FOUND");
        assert_eq!(mapped.body.error.request_id, "req-42");
        assert_eq!(
            mapped.body.error.details.get("identifier"),
            Some(&serde_json::json!("missing"))
        );
    }

    #[test]
    fn test_abort_keeps_its_own_code() {
        let error = DomainError::aborted("reason-x");
        let mapped = ErrorMapper::to_http_error(&error, "req-1");

        assert_eq!(mapped.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(mapped.body.error.code, "ABORTED");
    }

    #[test]
    fn test_from_generic_error_flattens_everything() {
        let error = std::io::Error::new(std::io::ErrorKind::Other, "x");
        let mapped = ErrorMapper::from_generic_error(&error, "req-7");

        assert_eq!(mapped.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(mapped.body.error.code, "INTERNAL_SERVER_ERROR");
        assert_eq!(
            mapped.body.error.details.get("originalMessage"),
            Some(&serde_json::json!("x"))
        );
        assert_eq!(mapped.body.error.request_id, "req-7");
    }

    #[test]
    fn test_body_serializes_camel_case() {
        let mapped = ErrorMapper::to_http_error(&DomainError::validation("bad"), "req-1");
        let json = serde_json::to_string(&mapped.body).unwrap();
        assert!(json.contains("requestId"));
        assert!(json.contains("\"code\":\"VALIDATION_ERROR\""));
    }
}
