//! Request boundary: rate limiting, timeouts and error logging

pub mod error_log;
pub mod rate_limit;
pub mod timeout;
