//! HTTP adapter for account endpoints.
//!
//! - `GET /users` - every account (admin only)
//! - `GET /users/:id` - one account
//! - `PUT /users/:id` - rename or change password (self only)
//! - `DELETE /users/:id` - delete account and its subscriptions (self only)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::user_routes;
