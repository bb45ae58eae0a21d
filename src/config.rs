//! Process configuration, read once at start-up from the environment.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use validator::Validate;

use crate::core::state::runtime::rate_limit::rate_limiter::RateLimitPolicy;
use crate::domain::log::service::log_file_service::{LogFileServiceOptions, DEFAULT_MAX_FILE_SIZE};

pub const ENV_LOGS_DIR: &str = "LOG_VIEWER_LOGS_DIR";
pub const ENV_PORT: &str = "PORT";
pub const ENV_HOST: &str = "LOG_VIEWER_HOST";
pub const ENV_MAX_FILE_SIZE: &str = "LOG_VIEWER_MAX_FILE_SIZE";
pub const ENV_RATE_LIMIT_MAX: &str = "LOG_VIEWER_RATE_LIMIT_MAX";
pub const ENV_RATE_LIMIT_WINDOW_SECS: &str = "LOG_VIEWER_RATE_LIMIT_WINDOW_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "LOG_VIEWER_REQUEST_TIMEOUT_SECS";
pub const ENV_CONFINE_TO_ROOT: &str = "LOG_VIEWER_CONFINE_TO_ROOT";
pub const ENV_APP_LOG_DIR: &str = "LOG_VIEWER_APP_LOG_DIR";

#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    /// Directory whose `.log` / `.txt` files are served.
    pub logs_dir: PathBuf,
    pub host: String,
    pub port: u16,
    #[validate(range(min = 1))]
    pub max_file_size: u64,
    #[validate(range(min = 1))]
    pub rate_limit_max: u32,
    #[validate(range(min = 1))]
    pub rate_limit_window_secs: u64,
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
    pub confine_to_root: bool,
    /// When set, service logs are also written to a daily rolling file here.
    pub app_log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("./logs"),
            host: "0.0.0.0".to_string(),
            port: 3001,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            rate_limit_max: 100,
            rate_limit_window_secs: 60,
            request_timeout_secs: 30,
            confine_to_root: true,
            app_log_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            logs_dir: lookup(ENV_LOGS_DIR).map(PathBuf::from).unwrap_or(defaults.logs_dir),
            host: lookup(ENV_HOST).unwrap_or(defaults.host),
            port: parse_var(&lookup, ENV_PORT, defaults.port)?,
            max_file_size: parse_var(&lookup, ENV_MAX_FILE_SIZE, defaults.max_file_size)?,
            rate_limit_max: parse_var(&lookup, ENV_RATE_LIMIT_MAX, defaults.rate_limit_max)?,
            rate_limit_window_secs: parse_var(
                &lookup,
                ENV_RATE_LIMIT_WINDOW_SECS,
                defaults.rate_limit_window_secs,
            )?,
            request_timeout_secs: parse_var(
                &lookup,
                ENV_REQUEST_TIMEOUT_SECS,
                defaults.request_timeout_secs,
            )?,
            confine_to_root: match lookup(ENV_CONFINE_TO_ROOT) {
                Some(raw) => parse_bool(&raw).with_context(|| format!("Invalid {}", ENV_CONFINE_TO_ROOT))?,
                None => defaults.confine_to_root,
            },
            app_log_dir: lookup(ENV_APP_LOG_DIR).map(PathBuf::from),
        };

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn rate_limit_policy(&self) -> RateLimitPolicy {
        RateLimitPolicy {
            max_requests: self.rate_limit_max,
            window: chrono::Duration::seconds(self.rate_limit_window_secs as i64),
        }
    }

    pub fn log_service_options(&self) -> LogFileServiceOptions {
        LogFileServiceOptions {
            max_file_size: self.max_file_size,
            confine_to_root: self.confine_to_root,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("Invalid {}={:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("expected a boolean, got {:?}", other)),
    }
}
