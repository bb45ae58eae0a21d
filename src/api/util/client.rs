use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use http::header::USER_AGENT;

pub const UNKNOWN_CLIENT: &str = "unknown";

/// Peer IP of the connection, or `"unknown"` when the server was not
/// started with connect info.
pub fn client_ip(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

pub fn user_agent(request: &Request) -> String {
    request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

pub fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}
