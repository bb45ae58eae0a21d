//! Log API routes (e.g., /api/logs/*)

use axum::{routing::get, Router};

use crate::api::controller::log::LogController;
use crate::app_state::AppState;

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/logs", get(LogController::list_logs))
        // Catch-all so names containing `/` or `..` reach the filename checks
        .route("/logs/{*filename}", get(LogController::get_log))
}
