use axum::{
    extract::OriginalUri,
    http::Method,
    middleware,
    response::Response,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::controller::system::SystemController;
use crate::api::middleware::error_log::log_errors;
use crate::api::middleware::rate_limit::rate_limit;
use crate::api::middleware::timeout::advisory_timeout;
use crate::api::routes::log_routes::log_routes;
use crate::api::routes::page_routes::page_routes;
use crate::api::util::client::is_api_path;
use crate::api::util::error_response::error_response;
use crate::app_state::AppState;
use crate::errors::AppError;

/// Build the main application router
pub fn app_router(state: AppState) -> Router {
    // Everything under /api, including unknown paths, is rate limited
    let api = log_routes()
        .fallback(handler_404)
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .merge(page_routes())
        .route("/health", get(SystemController::health))
        .nest("/api", api)
        .fallback(handler_404)
        .layer(middleware::from_fn_with_state(state.clone(), advisory_timeout))
        .layer(middleware::from_fn(log_errors))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

// Handler for 404 Not Found
async fn handler_404(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    let path = uri.path();
    let err = AppError::RouteNotFound {
        method: method.to_string(),
        path: path.to_string(),
    };
    error_response(err, is_api_path(path))
}
