//! User module - account identity and credentials.
//!
//! # Domain Invariants
//!
//! 1. Email is unique, trimmed and lowercased
//! 2. Names are 2-50 characters after trimming
//! 3. Plaintext passwords are at least 6 characters and never stored
//! 4. A password change needs old, new and confirmation together

mod aggregate;
mod password;
mod values;

pub use aggregate::User;
pub use password::PasswordChange;
pub use values::{
    validate_password, Email, UserName, MAX_NAME_LENGTH, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH,
};
