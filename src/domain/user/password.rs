//! Password change request validation.

use super::values::validate_password;
use crate::domain::foundation::{DomainError, ErrorCode};

/// A complete, self-consistent password change request.
///
/// The old password still has to be verified against the stored hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

impl PasswordChange {
    /// Builds a change from the three optional request fields.
    ///
    /// Returns `Ok(None)` when none of the fields are present. Partial
    /// presence or a confirmation mismatch is a validation error.
    pub fn from_parts(
        old_password: Option<String>,
        new_password: Option<String>,
        new_password_confirm: Option<String>,
    ) -> Result<Option<Self>, DomainError> {
        match (old_password, new_password, new_password_confirm) {
            (None, None, None) => Ok(None),
            (Some(old_password), Some(new_password), Some(confirm)) => {
                if new_password != confirm {
                    return Err(DomainError::new(
                        ErrorCode::PasswordMismatch,
                        "New password and confirmation do not match",
                    ));
                }
                validate_password("newPassword", &new_password)?;
                Ok(Some(Self {
                    old_password,
                    new_password,
                }))
            }
            _ => Err(DomainError::new(
                ErrorCode::MissingPasswordFields,
                "Old password, new password and confirmation must be provided together",
            )),
        }
    }
}
