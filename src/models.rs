//! Attendance Data Model
//!
//! Types exchanged with the attendance backend. Everything here lives for a
//! single render or request; nothing is cached or persisted locally.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Minimum attendance percentage a student must keep per subject.
///
/// Drives both the chart's reference line and the pass/fail color of each
/// subject row.
pub const MIN_ATTENDANCE_PERCENTAGE: f64 = 75.0;

/// Aggregate attendance for the signed-in student
///
/// Every field falls back to zero/empty when the backend omits it, so an
/// error body still deserializes into a zeroed summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceSummary {
    pub overall_percentage: f64,
    pub present_classes: u32,
    pub total_classes: u32,
    pub by_subject: Vec<SubjectAttendance>,
}

/// Attendance for one subject
///
/// `percentage` is expected to equal `present / total * 100`; the backend
/// owns that computation and it is not re-checked here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectAttendance {
    pub name: String,
    pub present: u32,
    pub total: u32,
    pub percentage: f64,
}

impl SubjectAttendance {
    pub fn new(name: impl Into<String>, present: u32, total: u32, percentage: f64) -> Self {
        Self {
            name: name.into(),
            present,
            total,
            percentage,
        }
    }

    /// Whether this subject meets the minimum attendance requirement
    pub fn tone(&self) -> AttendanceTone {
        AttendanceTone::for_percentage(self.percentage)
    }
}

/// Pass/fail classification of an attendance percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceTone {
    Pass,
    Fail,
}

impl AttendanceTone {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= MIN_ATTENDANCE_PERCENTAGE {
            AttendanceTone::Pass
        } else {
            AttendanceTone::Fail
        }
    }

    /// CSS class used to color the percentage
    pub fn css_class(&self) -> &'static str {
        match self {
            AttendanceTone::Pass => "text-green-600",
            AttendanceTone::Fail => "text-red-600",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceTone::Pass => "PASS",
            AttendanceTone::Fail => "FAIL",
        }
    }
}

/// Semester window as entered in the upload form.
///
/// Kept as raw strings: an empty string means the field was left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemesterDates {
    pub start_date: String,
    pub end_date: String,
}

impl SemesterDates {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.start_date.is_empty() && !self.end_date.is_empty()
    }
}

/// Body of `POST /api/timetable`
///
/// `data` is whatever the timetable parser produced; its shape is owned by
/// the parser and the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPayload {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_deserialize_camel_case() {
        let json = r#"{
            "overallPercentage": 82.5,
            "presentClasses": 33,
            "totalClasses": 40,
            "bySubject": [
                {"name": "Physics", "present": 18, "total": 20, "percentage": 90},
                {"name": "Chemistry", "present": 15, "total": 20, "percentage": 75}
            ]
        }"#;

        let summary: AttendanceSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.overall_percentage, 82.5);
        assert_eq!(summary.present_classes, 33);
        assert_eq!(summary.total_classes, 40);
        assert_eq!(summary.by_subject.len(), 2);
        assert_eq!(summary.by_subject[1].name, "Chemistry");
    }

    #[test]
    fn test_summary_missing_fields_default_to_zero() {
        let summary: AttendanceSummary =
            serde_json::from_str(r#"{"error": "Unauthorized"}"#).unwrap();
        assert_eq!(summary, AttendanceSummary::default());
        assert_eq!(summary.overall_percentage, 0.0);
        assert!(summary.by_subject.is_empty());
    }

    #[test]
    fn test_tone_boundary() {
        assert_eq!(AttendanceTone::for_percentage(75.0), AttendanceTone::Pass);
        assert_eq!(AttendanceTone::for_percentage(74.999), AttendanceTone::Fail);
        assert_eq!(AttendanceTone::for_percentage(100.0), AttendanceTone::Pass);
        assert_eq!(AttendanceTone::for_percentage(0.0), AttendanceTone::Fail);

        assert_eq!(AttendanceTone::Pass.css_class(), "text-green-600");
        assert_eq!(AttendanceTone::Fail.css_class(), "text-red-600");
    }

    #[test]
    fn test_semester_dates_completeness() {
        assert!(SemesterDates::new("2024-01-08", "2024-05-31").is_complete());
        assert!(!SemesterDates::new("", "2024-05-31").is_complete());
        assert!(!SemesterDates::new("2024-01-08", "").is_complete());
        // Whitespace is left to date parsing
        assert!(SemesterDates::new("2024-01-08", "  ").is_complete());
        assert!(!SemesterDates::default().is_complete());
    }

    #[test]
    fn test_upload_payload_serializes_iso_dates() {
        let payload = UploadPayload {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
            data: serde_json::json!({"entries": []}),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["startDate"], "2024-01-08");
        assert_eq!(value["endDate"], "2024-05-31");
        assert_eq!(value["data"]["entries"], serde_json::json!([]));
    }
}
