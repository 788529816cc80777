//! Authentication types for the domain layer.
//!
//! `AuthenticatedUser` is the requester identity resolved from a verified
//! token. It is populated by a `SessionValidator` adapter and carries the
//! admin flag read from the user record at verification time.

use super::{DomainError, ErrorCode, UserId};
use thiserror::Error;

/// Requester identity extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The account the token was issued for.
    pub id: UserId,

    pub email: String,

    pub name: String,

    /// Admin flag as stored on the account when the token was checked.
    pub is_admin: bool,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        is_admin: bool,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            is_admin,
        }
    }

    /// Returns true if this requester is the given user.
    pub fn is_user(&self, user_id: &UserId) -> bool {
        &self.id == user_id
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the user no longer exists.
    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// Token signing or user lookup failed for infrastructure reasons.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UserNotFound
        )
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::InvalidToken | AuthError::UserNotFound => ErrorCode::Unauthorized,
            AuthError::TokenExpired => ErrorCode::TokenExpired,
            AuthError::InsufficientPermissions => ErrorCode::Forbidden,
            AuthError::ServiceUnavailable(_) => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}
