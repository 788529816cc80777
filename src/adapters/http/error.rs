//! Translation of domain and extractor failures into HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ErrorKind};

use super::response::Envelope;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error returned by every HTTP handler and extractor.
///
/// Internal failures are logged here and reach the client only as a
/// generic message.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn unauthenticated() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "UNAUTHENTICATED",
            "Authentication required",
        )
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalError.to_string(),
            INTERNAL_MESSAGE,
        )
    }
}

/// Maps an error category to its HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        if err.kind() == ErrorKind::Internal {
            tracing::error!(code = %err.code, details = ?err.details, "{}", err.message);
            return Self::internal();
        }
        Self::new(status_for(err.kind()), err.code.to_string(), err.message)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired => {
                Self::new(StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED", "Token expired")
            }
            AuthError::InvalidToken | AuthError::UserNotFound => {
                Self::new(StatusCode::UNAUTHORIZED, "INVALID_TOKEN", "Unauthorized")
            }
            AuthError::InsufficientPermissions => Self::new(
                StatusCode::FORBIDDEN,
                ErrorCode::Forbidden.to_string(),
                "Insufficient permissions",
            ),
            AuthError::ServiceUnavailable(msg) => {
                tracing::error!(error = %msg, "auth service unavailable");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Envelope::failure(self.code, self.message))).into_response()
    }
}
