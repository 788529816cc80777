//! HTTP adapter for authentication endpoints.
//!
//! - `POST /auth/sign-up` - register and receive a session token
//! - `POST /auth/sign-in` - exchange credentials for a session token
//! - `POST /auth/sign-out` - clear the session cookie
//! - `POST /auth/create-admin` - register an admin with the shared key

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::auth_routes;
