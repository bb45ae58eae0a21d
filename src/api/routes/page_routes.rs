//! HTML page routes

use axum::{routing::get, Router};

use crate::api::controller::page::PageController;
use crate::app_state::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(PageController::index))
        .route("/logs/{*filename}", get(PageController::view_log))
}
