use serde::Serialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub error_type: &'static str,
    pub code: &'static str,
    pub message: String,
    pub status_code: u16,
    pub timestamp: String,
    pub suggestions: Vec<&'static str>,
}

impl ErrorDetail {
    pub fn from_error(err: &AppError, timestamp: String) -> Self {
        Self {
            error_type: err.error_type(),
            code: err.code(),
            message: err.public_message(),
            status_code: err.status_code().as_u16(),
            timestamp,
            suggestions: err.suggestions().to_vec(),
        }
    }
}

/// `{"success": false, "error": {...}}`
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorDetail,
}

impl ErrorEnvelope {
    pub fn new(error: ErrorDetail) -> Self {
        Self {
            success: false,
            error,
        }
    }
}
