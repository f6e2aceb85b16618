//! Dashboard Page State Machine
//!
//! Reacts to session status changes:
//!
//! - `loading`: show a placeholder, fetch nothing
//! - `unauthenticated`: redirect to the login route; the page is done
//! - `authenticated`: fetch the attendance summary once per transition
//!
//! A failed fetch is logged and the page renders zeros. The user is not told.

use crate::backend::AttendanceSource;
use crate::models::AttendanceSummary;
use crate::session::{Navigator, SessionStatus};

use super::view::DashboardView;

/// What the page shows in its current state
#[derive(Debug, Clone)]
pub enum PageRender {
    /// Session or data still pending
    Loading,
    /// A redirect was issued through the navigator
    Redirecting,
    Ready(DashboardView),
}

pub struct DashboardPage<S, N> {
    source: S,
    navigator: N,
    login_route: String,
    status: SessionStatus,
    redirected: bool,
    loading: bool,
    summary: Option<AttendanceSummary>,
}

impl<S: AttendanceSource, N: Navigator> DashboardPage<S, N> {
    pub fn new(source: S, navigator: N, login_route: impl Into<String>) -> Self {
        Self {
            source,
            navigator,
            login_route: login_route.into(),
            status: SessionStatus::Loading,
            redirected: false,
            loading: true,
            summary: None,
        }
    }

    /// Feed the latest session status into the page
    pub async fn on_session_status(&mut self, status: SessionStatus) {
        if self.redirected {
            return;
        }

        let previous = std::mem::replace(&mut self.status, status);
        match status {
            SessionStatus::Loading => {}
            SessionStatus::Unauthenticated => {
                self.navigator.push(&self.login_route);
                self.redirected = true;
            }
            SessionStatus::Authenticated => {
                if previous != SessionStatus::Authenticated {
                    self.fetch_attendance().await;
                }
            }
        }
    }

    async fn fetch_attendance(&mut self) {
        match self.source.fetch_summary().await {
            Ok(summary) => {
                tracing::debug!(subjects = summary.by_subject.len(), "Attendance data loaded");
                self.summary = Some(summary);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching attendance data");
            }
        }
        self.loading = false;
    }

    pub fn render(&self) -> PageRender {
        if self.redirected {
            PageRender::Redirecting
        } else if self.status == SessionStatus::Loading || self.loading {
            PageRender::Loading
        } else {
            PageRender::Ready(DashboardView::new(self.summary.as_ref()))
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn summary(&self) -> Option<&AttendanceSummary> {
        self.summary.as_ref()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}
