//! Dashboard View Model
//!
//! Flattens an attendance summary into what the page displays.

use crate::chart::{build_chart, ChartConfig};
use crate::models::{AttendanceSummary, AttendanceTone, SubjectAttendance};

/// Shown in place of the subject list when there are no subjects
pub const EMPTY_SUBJECTS_MESSAGE: &str =
    "No subjects found. Upload your timetable to get started.";

/// Everything the dashboard page renders from the summary
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub overall_percentage: f64,
    pub present_classes: u32,
    pub total_classes: u32,
    pub subjects: Vec<SubjectRow>,
    pub chart: ChartConfig,
}

/// One line of the subject list
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRow {
    pub name: String,
    pub present: u32,
    pub total: u32,
    pub percentage: f64,
    pub tone: AttendanceTone,
}

impl From<&SubjectAttendance> for SubjectRow {
    fn from(subject: &SubjectAttendance) -> Self {
        Self {
            name: subject.name.clone(),
            present: subject.present,
            total: subject.total,
            percentage: subject.percentage,
            tone: subject.tone(),
        }
    }
}

impl SubjectRow {
    /// e.g. "18 of 20 classes"
    pub fn classes_label(&self) -> String {
        format!("{} of {} classes", self.present, self.total)
    }

    pub fn percentage_label(&self) -> String {
        format!("{}%", self.percentage)
    }

    pub fn css_class(&self) -> &'static str {
        self.tone.css_class()
    }
}

impl DashboardView {
    /// Build the view. A missing summary renders as zeros and no subjects.
    pub fn new(summary: Option<&AttendanceSummary>) -> Self {
        let empty = AttendanceSummary::default();
        let summary = summary.unwrap_or(&empty);

        Self {
            overall_percentage: summary.overall_percentage,
            present_classes: summary.present_classes,
            total_classes: summary.total_classes,
            subjects: summary.by_subject.iter().map(SubjectRow::from).collect(),
            chart: build_chart(&summary.by_subject),
        }
    }

    pub fn has_subjects(&self) -> bool {
        !self.subjects.is_empty()
    }

    pub fn overall_label(&self) -> String {
        format!("{}%", self.overall_percentage)
    }

    /// e.g. "33 of 40 classes attended"
    pub fn classes_attended_label(&self) -> String {
        format!(
            "{} of {} classes attended",
            self.present_classes, self.total_classes
        )
    }

    pub fn empty_message(&self) -> &'static str {
        EMPTY_SUBJECTS_MESSAGE
    }
}
