//! HTTP adapter - REST API under `/api/v1`.
//!
//! Each resource has its own module with `dto`, `handlers` and `routes`.
//! Shared pieces:
//! - `state` - `AppState` and handler construction
//! - `response` - the `{success, message, data, count}` envelope
//! - `error` - `ApiError`, the single translator of failures into envelopes
//! - `middleware` - rate limit, bot filter, authentication

pub mod auth;
pub mod cookie;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod router;
pub mod state;
pub mod subscription;
pub mod user;

pub use error::ApiError;
pub use extract::ApiJson;
pub use response::{ApiResponse, Envelope};
pub use router::{app_router, WELCOME_TEXT};
pub use state::{AppState, ShieldSettings};
