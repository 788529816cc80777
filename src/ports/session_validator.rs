//! Session validation port for access tokens.
//!
//! HTTP middleware hands the raw token (from the `Authorization` header or
//! the `token` cookie) to a `SessionValidator` and gets the requester back.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and resolves the requester.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature and expiry
/// - Load the current account so `is_admin` reflects stored state
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::UserNotFound` when the subject no longer exists
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .map_err(|_| AuthError::service_unavailable("lock poisoned"))?
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn validator_resolves_known_token() {
        let user = AuthenticatedUser::new(UserId::new(), "a@example.com", "Alice", false);
        let mut tokens = HashMap::new();
        tokens.insert("good".to_string(), user.clone());
        let validator = TestSessionValidator {
            tokens: RwLock::new(tokens),
        };

        assert_eq!(validator.validate("good").await.unwrap(), user);
        assert!(matches!(
            validator.validate("bad").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
