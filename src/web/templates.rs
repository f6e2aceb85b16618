//! Page Templates
//!
//! Askama templates under `templates/`, rendered server-side.

use askama::Template;

use crate::dashboard::DashboardView;
use crate::upload::{UploadForm, ACCEPTED_EXTENSIONS};

/// Seconds before the loading placeholder asks the browser to retry
const LOADING_REFRESH_SECS: u64 = 2;

/// Upload form state as shown on the page
#[derive(Debug, Clone, Default)]
pub struct UploadFormView {
    pub start_date: String,
    pub end_date: String,
    pub error: String,
    pub success: String,
}

impl From<&UploadForm> for UploadFormView {
    fn from(form: &UploadForm) -> Self {
        Self {
            start_date: form.dates().start_date.clone(),
            end_date: form.dates().end_date.clone(),
            error: form.error().to_string(),
            success: form.success().to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub view: &'a DashboardView,
    pub upload: &'a UploadFormView,
    pub chart_json: String,
    pub chart_primitives: String,
    pub accept: String,
}

impl<'a> DashboardTemplate<'a> {
    pub fn new(
        view: &'a DashboardView,
        upload: &'a UploadFormView,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            view,
            upload,
            chart_json: view.chart.to_embedded_json()?,
            chart_primitives: crate::chart::register_chart_primitives().register_script_args(),
            accept: ACCEPTED_EXTENSIONS.join(","),
        })
    }
}

#[derive(Template)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub refresh_secs: u64,
}

impl Default for LoadingTemplate {
    fn default() -> Self {
        Self {
            refresh_secs: LOADING_REFRESH_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceSummary, SubjectAttendance};

    #[test]
    fn test_dashboard_template_renders_subjects() {
        let summary = AttendanceSummary {
            overall_percentage: 82.0,
            present_classes: 41,
            total_classes: 50,
            by_subject: vec![
                SubjectAttendance::new("Economics", 20, 25, 80.0),
                SubjectAttendance::new("Statistics", 21, 30, 70.0),
            ],
        };
        let view = DashboardView::new(Some(&summary));
        let upload = UploadFormView::default();

        let html = DashboardTemplate::new(&view, &upload).unwrap().render().unwrap();

        assert!(html.contains("<title>Dashboard | Attendance System</title>"));
        assert!(html.contains("82%"));
        assert!(html.contains("41 of 50 classes attended"));
        assert!(html.contains("Economics"));
        assert!(html.contains(r#"<span class="text-green-600">80%</span>"#));
        assert!(html.contains(r#"<span class="text-red-600">70%</span>"#));
        assert!(html.contains(".jpg,.jpeg,.png,.pdf,.xlsx,.xls"));
        assert!(html.contains("Chart.register(Chart.CategoryScale"));
        assert!(!html.contains("No subjects found"));
    }

    #[test]
    fn test_dashboard_template_empty_and_messages() {
        let view = DashboardView::new(None);
        let upload = UploadFormView {
            start_date: "2024-01-08".to_string(),
            end_date: String::new(),
            error: "Please select semester dates".to_string(),
            success: String::new(),
        };

        let html = DashboardTemplate::new(&view, &upload).unwrap().render().unwrap();

        assert!(html.contains("No subjects found. Upload your timetable to get started."));
        assert!(html.contains(r#"<div class="text-sm text-red-600 mt-2">Please select semester dates</div>"#));
        assert!(html.contains(r#"value="2024-01-08""#));
        assert!(!html.contains("text-green-600 mt-2"));
    }

    #[test]
    fn test_subject_names_are_escaped() {
        let summary = AttendanceSummary {
            by_subject: vec![SubjectAttendance::new("<b>Art</b>", 1, 1, 100.0)],
            ..Default::default()
        };
        let view = DashboardView::new(Some(&summary));
        let upload = UploadFormView::default();

        let html = DashboardTemplate::new(&view, &upload).unwrap().render().unwrap();
        assert!(!html.contains("<b>Art</b>"));
        assert!(html.contains("&lt;b&gt;Art"));
    }

    #[test]
    fn test_loading_template() {
        let html = LoadingTemplate::default().render().unwrap();
        assert!(html.contains("Loading..."));
        assert!(html.contains(r#"http-equiv="refresh" content="2""#));
    }
}
