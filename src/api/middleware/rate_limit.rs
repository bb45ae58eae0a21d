use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::api::util::client::client_ip;
use crate::app_state::AppState;
use crate::core::state::runtime::rate_limit::rate_limiter::RateLimitDecision;
use crate::errors::AppError;

const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Per-IP request budget for the `/api` routes.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let ip = client_ip(&request);

    match state.rate_limiter.check(&ip).await {
        RateLimitDecision::Allowed { remaining, reset_at } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            insert_number(headers, X_RATELIMIT_LIMIT, state.rate_limiter.max_requests());
            insert_number(headers, X_RATELIMIT_REMAINING, remaining);
            insert_number(headers, X_RATELIMIT_RESET, reset_at.timestamp());
            response
        }
        RateLimitDecision::Limited { retry_after_secs } => {
            warn!(ip = %ip, retry_after_secs, "Rate limit exceeded");
            AppError::TooManyRequests { retry_after_secs }.into_response()
        }
    }
}

fn insert_number(headers: &mut HeaderMap, name: HeaderName, value: impl Into<HeaderValue>) {
    headers.insert(name, value.into());
}
