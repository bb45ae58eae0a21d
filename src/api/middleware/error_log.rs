use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{SecondsFormat, Utc};
use tracing::error;
use uuid::Uuid;

use crate::api::util::client::{client_ip, user_agent};
use crate::api::util::error_response::ErrorLogContext;

/// The single place where failed requests are logged.
pub async fn log_errors(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let ip = client_ip(&request);
    let agent = user_agent(&request);

    let response = next.run(request).await;

    if let Some(ctx) = response.extensions().get::<ErrorLogContext>() {
        error!(
            timestamp = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            request_id = %request_id,
            method = %method,
            path = %path,
            ip = %ip,
            user_agent = %agent,
            status = ctx.status.as_u16(),
            code = ctx.code,
            error = %ctx.message,
            "Request failed"
        );
    }

    response
}
