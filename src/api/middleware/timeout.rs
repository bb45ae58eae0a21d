use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::api::util::client::is_api_path;
use crate::api::util::error_response::error_response;
use crate::app_state::AppState;
use crate::errors::{internal_error, AppError};

/// Advisory request timeout.
///
/// The handler runs in its own task. When the budget runs out a 408 is sent,
/// but the task is not aborted: an in-flight read finishes in the background
/// and its result is dropped.
pub async fn advisory_timeout(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let is_api = is_api_path(request.uri().path());
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let budget = state.config.request_timeout();

    let handler = tokio::spawn(next.run(request));

    match tokio::time::timeout(budget, handler).await {
        Ok(Ok(response)) => response,
        Ok(Err(join_error)) => error_response(internal_error(join_error), is_api),
        Err(_) => {
            warn!(method = %method, path = %path, timeout_secs = budget.as_secs(), "Request timeout");
            error_response(AppError::RequestTimeout, is_api)
        }
    }
}
