pub mod client;
pub mod error_response;
pub mod extract;
pub mod json;
