//! HTTP handlers

pub mod auth;
pub mod pages;
pub mod users;


use axum::http::StatusCode;

/// Fallback for any method/path pair without a handler
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}
