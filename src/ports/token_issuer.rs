//! Token issuance port.

use crate::domain::foundation::{AuthError, Timestamp, UserId};

/// A freshly minted access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: Timestamp,
    /// Lifetime in seconds, used for cookie `Max-Age`.
    pub expires_in_secs: i64,
}

/// Mints signed, time-bound access tokens for a user.
///
/// Tokens are verified by the matching [`super::SessionValidator`].
pub trait TokenIssuer: Send + Sync {
    /// Issue a token whose subject is `user_id`.
    ///
    /// # Errors
    ///
    /// - `AuthError::ServiceUnavailable` if signing fails
    fn issue(&self, user_id: &UserId) -> Result<IssuedToken, AuthError>;
}
