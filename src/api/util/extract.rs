//! Path extractors whose rejections use the app's error presentation.

use axum::extract::rejection::PathRejection;
use axum::extract::FromRequestParts;
use tracing::debug;

use crate::api::util::error_response::PageError;
use crate::errors::AppError;

/// `axum::extract::Path` for JSON routes: a rejection becomes the JSON envelope.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `axum::extract::Path` for HTML routes: a rejection renders an error page.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(PageError))]
pub struct PagePath<T>(pub T);

// Every path parameter here is a filename
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        debug!("Rejected path parameter: {}", rejection.body_text());
        AppError::InvalidFilename
    }
}

impl From<PathRejection> for PageError {
    fn from(rejection: PathRejection) -> Self {
        PageError(rejection.into())
    }
}
