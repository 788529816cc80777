//! Token bucket parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shape of every bucket handed out by the limiter.
///
/// A bucket starts full at `capacity` tokens. Every `refill_interval_secs`
/// it gains `refill_tokens`, never exceeding `capacity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBucketConfig {
    pub capacity: u32,
    pub refill_tokens: u32,
    pub refill_interval_secs: u64,
}

impl Default for TokenBucketConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            refill_tokens: 5,
            refill_interval_secs: 10,
        }
    }
}

impl TokenBucketConfig {
    pub fn refill_interval(&self) -> Duration {
        Duration::from_secs(self.refill_interval_secs)
    }

    /// Refill intervals needed to go from `tokens` back to capacity.
    pub(super) fn intervals_to_full(&self, tokens: u32) -> u32 {
        let missing = self.capacity.saturating_sub(tokens);
        if missing == 0 || self.refill_tokens == 0 {
            return 0;
        }
        missing.div_ceil(self.refill_tokens)
    }
}
