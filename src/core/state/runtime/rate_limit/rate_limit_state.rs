use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed-window request counter for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitCounter {
    pub count: u32,
    pub window_reset_at: DateTime<Utc>,
}

impl RateLimitCounter {
    /// First request of a fresh window.
    pub fn start(now: DateTime<Utc>, window: Duration) -> Self {
        Self {
            count: 1,
            window_reset_at: now + window,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.window_reset_at
    }

    /// Count one more request, opening a new window once the current one is over.
    pub fn register_hit(&mut self, now: DateTime<Utc>, window: Duration) {
        if self.is_expired(now) {
            *self = Self::start(now, window);
        } else {
            self.count = self.count.saturating_add(1);
        }
    }
}
