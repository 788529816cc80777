//! In-memory token bucket rate limiter.
//!
//! Buckets live in a `HashMap` behind a `tokio::sync::RwLock`, so limits
//! are per process. Refill is stepwise: whole batches of `refill_tokens`
//! are credited for each full interval elapsed since the last refill.
//!
//! A bucket that has refilled to capacity is indistinguishable from a fresh
//! one, so once the map reaches `max_keys` such buckets are dropped before a
//! new key is admitted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

use super::config::TokenBucketConfig;

#[derive(Debug, Clone)]
struct Bucket {
    tokens: u32,
    last_refill: Instant,
}

impl Bucket {
    fn full(config: &TokenBucketConfig, now: Instant) -> Self {
        Self {
            tokens: config.capacity,
            last_refill: now,
        }
    }

    /// Credits whole intervals elapsed since `last_refill`.
    fn refill(&mut self, config: &TokenBucketConfig, now: Instant) {
        let interval = config.refill_interval();
        if interval.is_zero() {
            self.tokens = config.capacity;
            self.last_refill = now;
            return;
        }

        let elapsed = now.saturating_duration_since(self.last_refill);
        let intervals = (elapsed.as_secs_f64() / interval.as_secs_f64()).floor() as u32;
        if intervals == 0 {
            return;
        }

        let credited = intervals.saturating_mul(config.refill_tokens);
        self.tokens = self.tokens.saturating_add(credited).min(config.capacity);
        self.last_refill += interval * intervals;
    }

    /// Time until the next batch of tokens is credited.
    fn until_next_refill(&self, config: &TokenBucketConfig, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last_refill);
        config.refill_interval().saturating_sub(elapsed)
    }

    fn is_idle(&self, config: &TokenBucketConfig) -> bool {
        self.tokens >= config.capacity
    }

    fn status(&self, config: &TokenBucketConfig, now: Instant) -> RateLimitStatus {
        let intervals = config.intervals_to_full(self.tokens);
        let until_full = if intervals == 0 {
            Duration::ZERO
        } else {
            self.until_next_refill(config, now) + config.refill_interval() * (intervals - 1)
        };

        RateLimitStatus {
            limit: config.capacity,
            remaining: self.tokens,
            reset_at: Timestamp::now().plus_secs(until_full.as_secs() as i64),
        }
    }
}

/// Tracked keys before idle buckets are swept.
pub const DEFAULT_MAX_KEYS: usize = 10_000;

/// Token bucket limiter keyed by [`RateLimitKey::storage_key`].
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    config: TokenBucketConfig,
    max_keys: usize,
    buckets: Arc<RwLock<HashMap<String, Bucket>>>,
}

impl InMemoryRateLimiter {
    pub fn new(config: TokenBucketConfig) -> Self {
        Self {
            config,
            max_keys: DEFAULT_MAX_KEYS,
            buckets: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys.max(1);
        self
    }

    /// Number of buckets currently held.
    pub async fn tracked_keys(&self) -> usize {
        self.buckets.read().await.len()
    }

    /// Drops every bucket that has refilled to capacity. Returns how many went.
    pub async fn evict_idle(&self) -> usize {
        self.evict_idle_at(Instant::now()).await
    }

    async fn evict_idle_at(&self, now: Instant) -> usize {
        let mut buckets = self.buckets.write().await;
        Self::sweep(&self.config, &mut buckets, now)
    }

    fn sweep(
        config: &TokenBucketConfig,
        buckets: &mut HashMap<String, Bucket>,
        now: Instant,
    ) -> usize {
        let before = buckets.len();
        buckets.retain(|_, bucket| {
            bucket.refill(config, now);
            !bucket.is_idle(config)
        });
        let evicted = before - buckets.len();
        if evicted > 0 {
            debug!(evicted, remaining = buckets.len(), "evicted idle rate limit buckets");
        }
        evicted
    }

    pub fn with_defaults() -> Self {
        Self::new(TokenBucketConfig::default())
    }

    pub fn config(&self) -> &TokenBucketConfig {
        &self.config
    }

    #[instrument(skip(self, key, now), fields(key = %key.storage_key()))]
    async fn check_at(&self, key: &RateLimitKey, now: Instant) -> RateLimitResult {
        let mut buckets = self.buckets.write().await;
        let storage_key = key.storage_key();
        if buckets.len() >= self.max_keys && !buckets.contains_key(&storage_key) {
            Self::sweep(&self.config, &mut buckets, now);
        }
        let bucket = buckets
            .entry(storage_key)
            .or_insert_with(|| Bucket::full(&self.config, now));
        bucket.refill(&self.config, now);

        if bucket.tokens == 0 {
            let wait = bucket.until_next_refill(&self.config, now);
            let retry_after_secs = (wait.as_secs_f64().ceil() as u32).max(1);
            debug!(retry_after_secs, "rate limit exceeded");
            return RateLimitResult::Denied(RateLimitDenied {
                limit: self.config.capacity,
                retry_after_secs,
                scope: key.scope,
                message: "Too many requests, please try again later".to_string(),
            });
        }

        bucket.tokens -= 1;
        RateLimitResult::Allowed(bucket.status(&self.config, now))
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        if key.identifier.is_empty() {
            return Err(RateLimitError::InvalidKey("empty identifier".to_string()));
        }
        Ok(self.check_at(&key, Instant::now()).await)
    }

    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        let now = Instant::now();
        let buckets = self.buckets.read().await;
        let mut bucket = buckets
            .get(&key.storage_key())
            .cloned()
            .unwrap_or_else(|| Bucket::full(&self.config, now));
        bucket.refill(&self.config, now);
        Ok(bucket.status(&self.config, now))
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        self.buckets.write().await.remove(&key.storage_key());
        Ok(())
    }
}
