use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::rate_limit_store::InMemoryRateLimitStore;
use super::rate_limit_store_trait::RateLimitStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::seconds(60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed {
        remaining: u32,
        reset_at: DateTime<Utc>,
    },
    Limited {
        retry_after_secs: u64,
    },
}

impl RateLimitDecision {
    #[cfg(test)]
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Applies a [`RateLimitPolicy`] on top of a pluggable counter store.
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    policy: RateLimitPolicy,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, policy: RateLimitPolicy) -> Self {
        Self { store, policy }
    }

    pub fn in_memory(policy: RateLimitPolicy) -> Self {
        Self::new(InMemoryRateLimitStore::new().shared(), policy)
    }

    pub fn max_requests(&self) -> u32 {
        self.policy.max_requests
    }

    pub async fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Utc::now()).await
    }

    pub async fn check_at(&self, key: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let counter = self.store.hit(key, now, self.policy.window).await;

        if counter.count > self.policy.max_requests {
            let millis = (counter.window_reset_at - now).num_milliseconds().max(0) as u64;
            return RateLimitDecision::Limited {
                retry_after_secs: millis.div_ceil(1000).max(1),
            };
        }

        RateLimitDecision::Allowed {
            remaining: self.policy.max_requests - counter.count,
            reset_at: counter.window_reset_at,
        }
    }
}
