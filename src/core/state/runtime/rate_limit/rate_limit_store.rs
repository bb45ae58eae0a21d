use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use super::rate_limit_state::RateLimitCounter;
use super::rate_limit_store_trait::RateLimitStore;

/// Process-local counter table. Entries are never evicted.
pub struct InMemoryRateLimitStore {
    counters: Mutex<HashMap<String, RateLimitCounter>>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryRateLimitStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn hit(&self, key: &str, now: DateTime<Utc>, window: Duration) -> RateLimitCounter {
        let mut guard = self.counters.lock().await;

        match guard.get_mut(key) {
            Some(counter) => {
                counter.register_hit(now, window);
                *counter
            }
            None => {
                let counter = RateLimitCounter::start(now, window);
                guard.insert(key.to_string(), counter);
                counter
            }
        }
    }
}
