//! Authentication handlers.
//!
//! Registration, sign-in and key-guarded admin creation.

mod create_admin;
mod sign_in;
mod sign_up;

pub use create_admin::{CreateAdminCommand, CreateAdminHandler};
pub use sign_in::{SignInCommand, SignInHandler};
pub use sign_up::{AuthSession, SignUpCommand, SignUpHandler};
