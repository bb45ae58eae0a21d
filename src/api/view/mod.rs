//! Minimal server-side HTML rendering for the non-API routes.

pub mod html;
pub mod pages;
