//! HS256 JWT adapter.
//!
//! `JwtTokenService` mints tokens with `{sub, iat, exp}` claims. The matching
//! `JwtSessionValidator` verifies signature and expiry, then loads the user
//! so that admin flags and deletions take effect immediately.

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp, UserId};
use crate::ports::{IssuedToken, SessionValidator, TokenIssuer, UserRepository};

/// Claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    /// Subject - the user ID
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and decodes access tokens with a shared secret.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in_secs: i64,
}

impl JwtTokenService {
    pub fn new(secret: &SecretString, expires_in_secs: i64) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            expires_in_secs,
        }
    }

    /// Verify signature and expiry, returning the subject.
    pub fn decode(&self, token: &str) -> Result<UserId, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            }
        })?;

        data.claims.sub.parse::<UserId>().map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", data.claims.sub);
            AuthError::InvalidToken
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AuthError::service_unavailable(format!("Failed to sign token: {}", e))
        })
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user_id: &UserId) -> Result<IssuedToken, AuthError> {
        let issued_at = Timestamp::now();
        let expires_at = issued_at.plus_secs(self.expires_in_secs);
        let token = self.sign(&Claims {
            sub: user_id.to_string(),
            iat: issued_at.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
        })?;

        Ok(IssuedToken {
            token,
            expires_at,
            expires_in_secs: self.expires_in_secs,
        })
    }
}

/// Resolves bearer tokens to the current state of the account.
pub struct JwtSessionValidator {
    tokens: Arc<JwtTokenService>,
    users: Arc<dyn UserRepository>,
}

impl JwtSessionValidator {
    pub fn new(tokens: Arc<JwtTokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let user_id = self.tokens.decode(token)?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await
            .map_err(|e| AuthError::service_unavailable(e.message))?
            .ok_or_else(|| {
                tracing::debug!(user_id = %user_id, "token subject no longer exists");
                AuthError::UserNotFound
            })?;

        Ok(AuthenticatedUser::new(
            *user.id(),
            user.email().as_str(),
            user.name().as_str(),
            user.is_admin(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::user::{Email, User, UserName};

    fn service() -> JwtTokenService {
        JwtTokenService::new(&SecretString::new("test-secret".to_string()), 86_400)
    }

    fn alice() -> User {
        User::register(
            UserName::parse("Alice").unwrap(),
            Email::parse("alice@example.com").unwrap(),
            "hash".to_string(),
        )
    }

    #[test]
    fn issued_token_decodes_to_subject() {
        let svc = service();
        let id = UserId::new();
        let issued = svc.issue(&id).unwrap();

        assert_eq!(issued.expires_in_secs, 86_400);
        assert_eq!(svc.decode(&issued.token).unwrap(), id);
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let other = JwtTokenService::new(&SecretString::new("other".to_string()), 60);
        let issued = other.issue(&UserId::new()).unwrap();
        assert!(matches!(service().decode(&issued.token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let svc = service();
        let long_ago = Timestamp::now().minus_days(2);
        let token = svc
            .sign(&Claims {
                sub: UserId::new().to_string(),
                iat: long_ago.as_unix_secs(),
                exp: long_ago.plus_secs(60).as_unix_secs(),
            })
            .unwrap();
        assert!(matches!(svc.decode(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(service().decode("not.a.jwt"), Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn validator_loads_current_account_state() {
        let store = InMemoryStore::new();
        let user = alice();
        store.seed_user(user.clone()).await;
        let svc = Arc::new(service());
        let token = svc.issue(user.id()).unwrap().token;
        let validator = JwtSessionValidator::new(svc, Arc::new(store));

        let requester = validator.validate(&token).await.unwrap();
        assert_eq!(requester.id, *user.id());
        assert_eq!(requester.email, "alice@example.com");
        assert!(!requester.is_admin);
    }

    #[tokio::test]
    async fn token_for_deleted_user_is_rejected() {
        let svc = Arc::new(service());
        let token = svc.issue(&UserId::new()).unwrap().token;
        let validator = JwtSessionValidator::new(svc, Arc::new(InMemoryStore::new()));

        assert!(matches!(
            validator.validate(&token).await,
            Err(AuthError::UserNotFound)
        ));
    }
}
