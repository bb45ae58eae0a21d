use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::rate_limit_state::RateLimitCounter;

/// Storage for per-client rate-limit counters.
///
/// Implementations must make `hit` an atomic read-modify-write: concurrent
/// hits for the same key may not lose increments.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Register one request for `key` and return the updated counter.
    async fn hit(&self, key: &str, now: DateTime<Utc>, window: Duration) -> RateLimitCounter;
}
