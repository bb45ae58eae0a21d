//! Log controller: connects the /api/logs routes to the log file service

use axum::extract::State;
use axum::Json;

use crate::api::dto::log_dto::{LogFileContentResponse, LogFileListResponse};
use crate::api::dto::ApiResponse;
use crate::api::util::extract::ApiPath;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::errors::AppError;

pub struct LogController;

impl LogController {
    pub async fn list_logs(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<LogFileListResponse>>, AppError> {
        to_json(state.log_service.list_with_totals(state.logs_dir()).await)
    }

    pub async fn get_log(
        State(state): State<AppState>,
        ApiPath(filename): ApiPath<String>,
    ) -> Result<Json<ApiResponse<LogFileContentResponse>>, AppError> {
        let content = state.log_service.read_file(state.logs_dir(), &filename).await?;
        Ok(Json(ApiResponse::ok(LogFileContentResponse::new(filename, content))))
    }
}
