//! Dashboard Routes
//!
//! - GET / - Redirect to the dashboard
//! - GET /dashboard - Session-gated attendance dashboard

use askama::Template;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::request_cookie;
use crate::backend::BackendClient;
use crate::dashboard::{DashboardPage, PageRender};
use crate::session::{RedirectRecorder, SessionProvider, SessionStatus};
use crate::web::error::WebResult;
use crate::web::state::AppState;
use crate::web::templates::{DashboardTemplate, LoadingTemplate, UploadFormView};

/// GET /
pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

/// GET /dashboard
pub async fn show_dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> WebResult<Response> {
    let client = state.backend.with_cookie(request_cookie(&headers));
    let session = client.session().await;

    render_page(&state, client, session.status, UploadFormView::default()).await
}

/// Run the dashboard page for one request and render its outcome
pub(crate) async fn render_page(
    state: &AppState,
    client: BackendClient,
    status: SessionStatus,
    upload: UploadFormView,
) -> WebResult<Response> {
    let mut page = DashboardPage::new(client, RedirectRecorder::new(), state.login_route());
    page.on_session_status(status).await;

    match page.render() {
        PageRender::Loading => {
            let html = LoadingTemplate::default().render()?;
            Ok(Html(html).into_response())
        }
        PageRender::Redirecting => {
            let target = page
                .navigator()
                .take()
                .unwrap_or_else(|| state.login_route().to_string());
            Ok(Redirect::to(&target).into_response())
        }
        PageRender::Ready(view) => {
            let html = DashboardTemplate::new(&view, &upload)?.render()?;
            Ok(Html(html).into_response())
        }
    }
}
