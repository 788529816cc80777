//! Validated value objects for user accounts.

use crate::domain::foundation::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length of a user name, after trimming.
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum length of a user name, after trimming.
pub const MAX_NAME_LENGTH: usize = 50;

/// Minimum length of a plaintext password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// Display name of an account, trimmed and 2-50 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let len = trimmed.chars().count();
        if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
            return Err(ValidationError::out_of_range(
                "name",
                MIN_NAME_LENGTH as i32,
                MAX_NAME_LENGTH as i32,
                len as i32,
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Login email, trimmed and lowercased.
///
/// Uniqueness is enforced by the repository, not here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(ValidationError::invalid_format("email", "Invalid email address"));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks the plaintext password policy before hashing.
pub fn validate_password(field: &str, password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::invalid_format(
            field,
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_name_is_trimmed() {
        let name = UserName::parse("  Alice  ").unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn user_name_rejects_too_short_and_too_long() {
        assert!(matches!(
            UserName::parse("A"),
            Err(ValidationError::OutOfRange { actual: 1, .. })
        ));
        assert!(UserName::parse(&"x".repeat(51)).is_err());
        assert!(UserName::parse(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn user_name_rejects_blank() {
        assert_eq!(UserName::parse("   "), Err(ValidationError::empty_field("name")));
    }

    #[test]
    fn email_is_normalized() {
        let email = Email::parse("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        assert!(Email::parse("alice").is_err());
        assert!(Email::parse("alice@example").is_err());
        assert!(Email::parse("al ice@example.com").is_err());
        assert!(Email::parse("").is_err());
    }

    #[test]
    fn password_policy_requires_six_characters() {
        assert!(validate_password("password", "12345").is_err());
        assert!(validate_password("password", "123456").is_ok());
        assert_eq!(
            validate_password("password", ""),
            Err(ValidationError::empty_field("password"))
        );
    }
}
