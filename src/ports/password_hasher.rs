//! Password hashing port.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// One-way password hashing with a random per-call salt.
///
/// Implementations return self-describing hash strings so `verify` needs
/// no extra parameters.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password.
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Returns `Ok(false)` when the password does not match.
    ///
    /// # Errors
    ///
    /// - `InternalError` if `hash` cannot be parsed
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
