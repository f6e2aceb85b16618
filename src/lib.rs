//! # Attendance
//!
//! Student Attendance Dashboard - a server-rendered dashboard showing
//! attendance percentages, a per-subject trend chart against the minimum
//! requirement, and a timetable upload form.
//!
//! ## Modules
//!
//! - [`dashboard`]: Session-gated dashboard page and its view model
//! - [`chart`]: Chart configuration for per-subject attendance
//! - [`upload`]: Timetable upload form
//! - [`backend`]: Client for the attendance backend and auth provider
//! - [`ocr`]: Text extraction and timetable parsing
//! - [`web`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use attendance::{AppState, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default();
//!     attendance::logging::init_tracing(&config.logging);
//!
//!     let state = AppState::from_config(&config)?;
//!     attendance::serve(state).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod models;
pub mod ocr;
pub mod session;
pub mod upload;
pub mod web;

// Re-export top-level types for convenience
pub use models::{
    AttendanceSummary, AttendanceTone, SemesterDates, SubjectAttendance, UploadPayload,
    MIN_ATTENDANCE_PERCENTAGE,
};

pub use chart::{build_chart, register_chart_primitives, ChartConfig};

pub use dashboard::{DashboardPage, DashboardView, PageRender};

pub use upload::{SelectedFile, TimetableFormat, UploadError, UploadForm, UploadServices};

pub use session::{Navigator, RedirectRecorder, SessionProvider, SessionSnapshot, SessionStatus};

pub use backend::{AttendanceSource, BackendClient, BackendError, TimetableStore};

pub use ocr::{LineTimetableParser, TesseractExtractor, TextExtractor, TimetableParser};

pub use config::{Config, ConfigError};

pub use web::{build_router, serve, AppState, WebError};
