//! Wire shapes of the JSON API

pub mod error_dto;
pub mod log_dto;
pub mod system_dto;

use serde::Serialize;

/// Successful API payload: `{"success": true, ...fields of T}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
