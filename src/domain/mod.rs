//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, access policy)
//! - `subscription` - Subscription lifecycle and renewal selection
//! - `user` - Account identity and credential rules

pub mod foundation;
pub mod subscription;
pub mod user;
