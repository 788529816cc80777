//! Rate limiter adapters.
//!
//! - `InMemoryRateLimiter` - per-process token buckets

mod config;
mod in_memory;

pub use config::TokenBucketConfig;
pub use in_memory::{InMemoryRateLimiter, DEFAULT_MAX_KEYS};
