//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;
const MIN_TOKEN_LIFETIME_SECS: i64 = 60;
const MAX_TOKEN_LIFETIME_SECS: i64 = 30 * 24 * 60 * 60;

/// Session token and admin bootstrap settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens
    pub jwt_secret: SecretString,

    /// Token lifetime in seconds
    #[serde(default = "default_jwt_expires_in")]
    pub jwt_expires_in_secs: i64,

    /// Shared secret required by the admin creation endpoint
    pub admin_creation_key: SecretString,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Production additionally requires a signing secret long enough to
    /// resist brute force.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.admin_creation_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ADMIN_CREATION_KEY"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::WeakJwtSecret(MIN_PRODUCTION_SECRET_LEN));
        }
        if !(MIN_TOKEN_LIFETIME_SECS..=MAX_TOKEN_LIFETIME_SECS).contains(&self.jwt_expires_in_secs) {
            return Err(ValidationError::InvalidTokenLifetime);
        }
        Ok(())
    }
}

fn default_jwt_expires_in() -> i64 {
    24 * 60 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::new(secret.to_string()),
            jwt_expires_in_secs: default_jwt_expires_in(),
            admin_creation_key: SecretString::new("admin-key".to_string()),
        }
    }

    #[test]
    fn test_default_lifetime_is_one_day() {
        assert_eq!(default_jwt_expires_in(), 86_400);
    }

    #[test]
    fn test_short_secret_ok_in_development() {
        assert!(config("dev").validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_short_secret_rejected_in_production() {
        assert_eq!(
            config("dev").validate(&Environment::Production),
            Err(ValidationError::WeakJwtSecret(32))
        );
        let long = "x".repeat(32);
        assert!(config(&long).validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_empty_secrets_are_missing() {
        assert_eq!(
            config("").validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );

        let mut no_key = config("dev");
        no_key.admin_creation_key = SecretString::new(String::new());
        assert_eq!(
            no_key.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__ADMIN_CREATION_KEY"))
        );
    }

    #[test]
    fn test_lifetime_bounds() {
        let mut cfg = config("dev");
        cfg.jwt_expires_in_secs = 10;
        assert_eq!(
            cfg.validate(&Environment::Development),
            Err(ValidationError::InvalidTokenLifetime)
        );
        cfg.jwt_expires_in_secs = 60;
        assert!(cfg.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", config("super-secret-value"));
        assert!(!rendered.contains("super-secret-value"));
    }
}
