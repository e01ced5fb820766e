// src/routes/mod.rs

use axum::http::StatusCode;

pub mod doctors;
pub mod health;

// Common error mappers: every failure is terminal for the request.
pub fn internal_error<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, format!("internal error: {e}"))
}

pub fn bad_request(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, msg.into())
}

pub fn conflict(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::CONFLICT, msg.into())
}

pub fn not_found(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, msg.into())
}
