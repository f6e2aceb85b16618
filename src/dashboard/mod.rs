//! Attendance Dashboard
//!
//! The session-gated dashboard page and the view model it renders.

pub mod page;
pub mod view;

pub use page::{DashboardPage, PageRender};
pub use view::{DashboardView, SubjectRow, EMPTY_SUBJECTS_MESSAGE};
