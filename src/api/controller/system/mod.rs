//! System controller: liveness probe

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::api::dto::system_dto::HealthResponse;
use crate::app_state::AppState;

pub struct SystemController;

impl SystemController {
    pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy",
            timestamp: Utc::now(),
            uptime: state.started_at.elapsed().as_secs_f64(),
            version: env!("CARGO_PKG_VERSION"),
        })
    }
}
