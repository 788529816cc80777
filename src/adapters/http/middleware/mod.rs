//! HTTP middleware for axum.
//!
//! Applied outermost first:
//!
//! - `rate_limit` - per-IP token bucket
//! - `bot_filter` - user-agent screening
//! - `auth` - bearer token or cookie resolution into `AuthenticatedUser`

pub mod auth;
pub mod bot_filter;
pub mod rate_limit;

pub use auth::{auth_middleware, RequireAuth};
pub use bot_filter::{bot_filter_middleware, classify_user_agent, BotVerdict};
pub use rate_limit::rate_limit_middleware;
