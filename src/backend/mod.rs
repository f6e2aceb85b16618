//! Attendance Backend
//!
//! The backend owns attendance computation, timetable persistence and
//! authentication. This module defines what the dashboard needs from it and
//! an HTTP client that provides it.
//!
//! - `GET /api/attendance` - Attendance summary for the signed-in student
//! - `POST /api/timetable` - Persist a parsed timetable
//! - `GET /api/auth/session` - Current session
//! - `GET /api/auth/csrf`, `POST /api/auth/signout` - Sign out

mod client;

pub use client::BackendClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AttendanceSummary, UploadPayload};

/// Source of the attendance summary shown on the dashboard
#[async_trait]
pub trait AttendanceSource: Send + Sync {
    async fn fetch_summary(&self) -> Result<AttendanceSummary, BackendError>;
}

/// Persistence endpoint for parsed timetables
#[async_trait]
pub trait TimetableStore: Send + Sync {
    async fn save_timetable(&self, payload: &UploadPayload) -> Result<(), BackendError>;
}

/// Errors that can occur when communicating with the backend
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BackendError {
    /// Classify a transport error the way the rest of the client reports it
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_connect() {
            BackendError::Unavailable
        } else {
            BackendError::Request(e)
        }
    }

    /// Whether the backend answered with a non-2xx status
    pub fn is_status(&self) -> bool {
        matches!(self, BackendError::Status { .. })
    }
}
