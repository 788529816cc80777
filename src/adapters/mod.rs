//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Argon2 password hashing and JWT session tokens
//! - `http` - axum REST API
//! - `memory` - in-memory persistence for tests and local runs
//! - `postgres` - sqlx persistence
//! - `rate_limiter` - token bucket request metering
//! - `workflow` - reminder workflow trigger client

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod rate_limiter;
pub mod workflow;
