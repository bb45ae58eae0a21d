pub mod rate_limit_state;
pub mod rate_limit_store;
pub mod rate_limit_store_trait;
pub mod rate_limiter;
