//! HTTP adapter for subscription endpoints.
//!
//! - `GET /subscriptions` - all subscriptions with owners (admin only)
//! - `POST /subscriptions` - create and trigger the reminder workflow
//! - `GET /subscriptions/upcoming-renewals` - renewals in the next 7 days
//! - `GET /subscriptions/user/:id` - one user's subscriptions
//! - `GET|PUT|DELETE /subscriptions/:id`
//! - `PUT /subscriptions/:id/cancel`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::subscription_routes;
