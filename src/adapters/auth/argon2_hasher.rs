//! Argon2id password hashing adapter.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`) carrying their own random
//! salt and parameters, so verification needs nothing but the stored string.
//! Hashing is CPU-bound and runs on the blocking pool.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier};
use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| hashing_failed(format!("Failed to hash password: {}", e)))
        })
        .await
        .map_err(|e| hashing_failed(format!("Hashing task failed: {}", e)))?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&hash)
                .map_err(|e| hashing_failed(format!("Stored hash is malformed: {}", e)))?;
            Ok(Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|e| hashing_failed(format!("Verification task failed: {}", e)))?
    }
}

fn hashing_failed(message: String) -> DomainError {
    tracing::error!(error = %message, "password hashing failure");
    DomainError::new(ErrorCode::InternalError, message)
}
