//! Route Handlers
//!
//! Page and health endpoint handlers organized by feature.

pub mod dashboard;
pub mod health;
pub mod session;
pub mod timetable;

use axum::http::{header, HeaderMap};

/// The browser's `Cookie` header, forwarded to the backend as-is
pub(crate) fn request_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
