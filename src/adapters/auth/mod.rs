//! Authentication adapters.
//!
//! - `argon2_hasher` - Argon2id implementation of `PasswordHasher`
//! - `jwt` - HS256 `TokenIssuer` and `SessionValidator`
//! - `mock` - token-table validator for tests

mod argon2_hasher;
mod jwt;
mod mock;

pub use argon2_hasher::Argon2Hasher;
pub use jwt::{JwtSessionValidator, JwtTokenService};
pub use mock::MockSessionValidator;
