use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::core::persistence::logs::log_file_fs_adapter::LogFileFsAdapter;
use crate::core::state::runtime::rate_limit::rate_limiter::RateLimiter;
use crate::domain::log::service::log_file_service::LogFileService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub log_service: Arc<LogFileService<LogFileFsAdapter>>,
    pub rate_limiter: Arc<RateLimiter>,
    pub started_at: Instant,
}

impl AppState {
    pub fn logs_dir(&self) -> &Path {
        &self.config.logs_dir
    }
}

pub fn build_app_state(config: AppConfig) -> AppState {
    let log_service = LogFileService::new(LogFileFsAdapter::new(), config.log_service_options());
    let rate_limiter = RateLimiter::in_memory(config.rate_limit_policy());

    AppState {
        config: Arc::new(config),
        log_service: Arc::new(log_service),
        rate_limiter: Arc::new(rate_limiter),
        started_at: Instant::now(),
    }
}
