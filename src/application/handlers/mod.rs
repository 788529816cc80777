//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler owns `Arc<dyn Port>` collaborators and exposes one `handle`.

pub mod account;
pub mod auth;
pub mod subscription;

#[cfg(test)]
mod test_support;
