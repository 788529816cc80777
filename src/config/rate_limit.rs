//! Rate limiting configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::rate_limiter::TokenBucketConfig;

/// Per-client token bucket settings for the HTTP layer
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Bucket size, which is also the burst allowance
    #[serde(default = "default_capacity")]
    pub capacity: u32,

    /// Tokens added per refill interval
    #[serde(default = "default_refill_tokens")]
    pub refill_tokens: u32,

    #[serde(default = "default_refill_interval")]
    pub refill_interval_secs: u64,

    /// Key buckets on X-Forwarded-For / X-Real-IP. Only safe behind a
    /// proxy that overwrites those headers.
    #[serde(default)]
    pub trust_proxy_headers: bool,
}

impl RateLimitConfig {
    pub fn bucket(&self) -> TokenBucketConfig {
        TokenBucketConfig {
            capacity: self.capacity,
            refill_tokens: self.refill_tokens,
            refill_interval_secs: self.refill_interval_secs,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.capacity == 0 || self.refill_tokens == 0 || self.refill_interval_secs == 0 {
            return Err(ValidationError::InvalidRateLimit);
        }
        Ok(())
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            capacity: default_capacity(),
            refill_tokens: default_refill_tokens(),
            refill_interval_secs: default_refill_interval(),
            trust_proxy_headers: false,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_capacity() -> u32 {
    10
}

fn default_refill_tokens() -> u32 {
    5
}

fn default_refill_interval() -> u64 {
    10
}
