use axum::Json;

use crate::api::dto::ApiResponse;
use crate::errors::AppError;

/// Map a domain result into `Json<ApiResponse<D>>`, converting the value into its DTO.
pub fn to_json<T, D>(result: Result<T, AppError>) -> Result<Json<ApiResponse<D>>, AppError>
where
    D: serde::Serialize + From<T>,
{
    result.map(|value| Json(ApiResponse::ok(D::from(value))))
}
