//! Page controller: HTML views of the log directory

use axum::extract::State;
use axum::response::Html;

use crate::api::util::error_response::PageError;
use crate::api::util::extract::PagePath;
use crate::api::view::pages::{render_index, render_log_view};
use crate::app_state::AppState;

pub struct PageController;

impl PageController {
    pub async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
        let listing = state.log_service.list_with_totals(state.logs_dir()).await?;
        Ok(Html(render_index(&listing)))
    }

    pub async fn view_log(
        State(state): State<AppState>,
        PagePath(filename): PagePath<String>,
    ) -> Result<Html<String>, PageError> {
        let content = state.log_service.read_file(state.logs_dir(), &filename).await?;
        // Navigation list of every file next to the content
        let all_files = state.log_service.list_available_files(state.logs_dir()).await?;

        Ok(Html(render_log_view(&filename, &content, &all_files)))
    }
}
