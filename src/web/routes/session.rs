//! Session Routes
//!
//! - POST /signout - End the session and return to the login route

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::request_cookie;
use crate::session::SessionProvider;
use crate::web::state::AppState;

/// POST /signout
///
/// Relays the backend's `Set-Cookie` headers so the browser drops its
/// session. A failed sign-out is logged and still lands on the login route.
pub async fn sign_out(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let client = state.backend.with_cookie(request_cookie(&headers));
    let mut response = Redirect::to(state.login_route()).into_response();

    match client.sign_out().await {
        Ok(outcome) => {
            tracing::info!("Signed out");
            for cookie in outcome.set_cookies {
                if let Ok(value) = HeaderValue::from_str(&cookie) {
                    response.headers_mut().append(header::SET_COOKIE, value);
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Sign out failed");
        }
    }

    response
}
