//! Route declarations

pub mod log_routes;
pub mod page_routes;
