//! Presentation of [`AppError`]: JSON for the API, HTML for pages.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};

use crate::api::dto::error_dto::{ErrorDetail, ErrorEnvelope};
use crate::api::view::pages::render_error_page;
use crate::errors::AppError;

/// Attached to every error response so the logging middleware can report
/// the failure without re-deriving it.
#[derive(Debug, Clone)]
pub struct ErrorLogContext {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn finish(mut response: Response, err: &AppError) -> Response {
    if let AppError::TooManyRequests { retry_after_secs } = err {
        if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
    }

    response.extensions_mut().insert(ErrorLogContext {
        status: err.status_code(),
        code: err.code(),
        message: err.to_string(),
    });
    response
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = ErrorDetail::from_error(&self, now_timestamp());
        let response = (self.status_code(), Json(ErrorEnvelope::new(detail))).into_response();
        finish(response, &self)
    }
}

/// An [`AppError`] raised while rendering an HTML page.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let err = self.0;
        let detail = ErrorDetail::from_error(&err, now_timestamp());
        let body = render_error_page(&detail, err.is_retryable());
        let response = (err.status_code(), Html(body)).into_response();
        finish(response, &err)
    }
}

/// JSON under `/api`, HTML elsewhere.
pub fn error_response(err: AppError, is_api: bool) -> Response {
    if is_api {
        err.into_response()
    } else {
        PageError(err).into_response()
    }
}
