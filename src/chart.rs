//! Attendance Chart
//!
//! Builds the Chart.js line-chart configuration for the dashboard: one series
//! with each subject's attendance and a dashed reference line at the minimum
//! required percentage.

use serde::Serialize;
use std::sync::OnceLock;

use crate::models::{SubjectAttendance, MIN_ATTENDANCE_PERCENTAGE};

/// Label of the per-subject attendance series
pub const ATTENDANCE_SERIES_LABEL: &str = "Attendance Percentage";

/// Suffix appended to axis ticks and tooltip values
pub const PERCENT_SUFFIX: &str = "%";

/// Chart.js primitives the line chart depends on
const CHART_PRIMITIVES: [&str; 7] = [
    "CategoryScale",
    "LinearScale",
    "PointElement",
    "LineElement",
    "Title",
    "Tooltip",
    "Legend",
];

static REGISTRY: OnceLock<ChartRegistry> = OnceLock::new();

/// Chart.js components registered for this process
#[derive(Debug)]
pub struct ChartRegistry {
    primitives: Vec<&'static str>,
}

impl ChartRegistry {
    pub fn primitives(&self) -> &[&'static str] {
        &self.primitives
    }

    /// Arguments for `Chart.register(...)` on the rendered page
    pub fn register_script_args(&self) -> String {
        self.primitives
            .iter()
            .map(|name| format!("Chart.{}", name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Register chart primitives. Only the first call does any work.
pub fn register_chart_primitives() -> &'static ChartRegistry {
    REGISTRY.get_or_init(|| {
        tracing::debug!(primitives = ?CHART_PRIMITIVES, "Registering chart primitives");
        ChartRegistry {
            primitives: CHART_PRIMITIVES.to_vec(),
        }
    })
}

/// Complete chart configuration, serialized as Chart.js expects it
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<[u32; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub scales: Scales,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scales {
    pub y: Axis,
}

/// Y axis bounds; `suffix` is read by the page script's tick callback
#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub ticks: Ticks,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ticks {
    pub suffix: &'static str,
}

impl ChartConfig {
    pub fn series_count(&self) -> usize {
        self.data.datasets.len()
    }

    /// Serialize for embedding in a `<script type="application/json">` block
    pub fn to_embedded_json(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(json.replace("</", "<\\/"))
    }
}

/// Label of the threshold series, e.g. "Minimum Required (75%)"
pub fn threshold_series_label() -> String {
    format!(
        "Minimum Required ({}{})",
        MIN_ATTENDANCE_PERCENTAGE, PERCENT_SUFFIX
    )
}

/// Build the line-chart configuration for the given subjects
pub fn build_chart(subjects: &[SubjectAttendance]) -> ChartConfig {
    register_chart_primitives();

    let labels = subjects.iter().map(|s| s.name.clone()).collect();
    let percentages = subjects.iter().map(|s| s.percentage).collect();

    let actual = Dataset {
        label: ATTENDANCE_SERIES_LABEL.to_string(),
        data: percentages,
        border_color: "rgb(59, 130, 246)",
        background_color: "rgba(59, 130, 246, 0.5)",
        tension: Some(0.1),
        border_dash: None,
        border_width: None,
        point_radius: None,
    };

    let threshold = Dataset {
        label: threshold_series_label(),
        data: vec![MIN_ATTENDANCE_PERCENTAGE; subjects.len()],
        border_color: "rgb(239, 68, 68)",
        background_color: "rgba(239, 68, 68, 0.1)",
        tension: None,
        border_dash: Some([5, 5]),
        border_width: Some(1),
        point_radius: Some(0),
    };

    ChartConfig {
        kind: "line",
        data: ChartData {
            labels,
            datasets: vec![actual, threshold],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            scales: Scales {
                y: Axis {
                    min: 0.0,
                    max: 100.0,
                    ticks: Ticks {
                        suffix: PERCENT_SUFFIX,
                    },
                },
            },
        },
    }
}

/// Y-axis tick label, e.g. `80%`
pub fn format_tick(value: f64) -> String {
    format!("{}{}", value, PERCENT_SUFFIX)
}

/// Tooltip line, e.g. `Attendance Percentage: 82.5%`
pub fn format_tooltip(series_label: &str, raw: f64) -> String {
    format!("{}: {}{}", series_label, raw, PERCENT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects() -> Vec<SubjectAttendance> {
        vec![
            SubjectAttendance::new("Mathematics", 27, 30, 90.0),
            SubjectAttendance::new("Physics", 14, 20, 70.0),
            SubjectAttendance::new("History", 9, 12, 75.0),
        ]
    }

    #[test]
    fn test_two_series_of_subject_length() {
        let chart = build_chart(&subjects());

        assert_eq!(chart.kind, "line");
        assert_eq!(chart.series_count(), 2);
        assert_eq!(
            chart.data.labels,
            vec!["Mathematics", "Physics", "History"]
        );
        for dataset in &chart.data.datasets {
            assert_eq!(dataset.data.len(), 3);
        }
        assert_eq!(chart.data.datasets[0].data, vec![90.0, 70.0, 75.0]);
        assert!(chart.data.datasets[1].data.iter().all(|v| *v == 75.0));
    }

    #[test]
    fn test_empty_subjects_yield_empty_chart() {
        let chart = build_chart(&[]);

        assert!(chart.data.labels.is_empty());
        assert_eq!(chart.series_count(), 2);
        assert!(chart.data.datasets.iter().all(|d| d.data.is_empty()));
    }

    #[test]
    fn test_threshold_series_styling() {
        let chart = build_chart(&subjects());
        let threshold = &chart.data.datasets[1];

        assert_eq!(threshold.label, "Minimum Required (75%)");
        assert_eq!(threshold.border_dash, Some([5, 5]));
        assert_eq!(threshold.point_radius, Some(0));
        assert_eq!(threshold.border_width, Some(1));
        assert_eq!(chart.data.datasets[0].label, "Attendance Percentage");
        assert_eq!(chart.data.datasets[0].tension, Some(0.1));
    }

    #[test]
    fn test_serialized_shape() {
        let chart = build_chart(&subjects());
        let value = serde_json::to_value(&chart).unwrap();

        assert_eq!(value["type"], "line");
        assert_eq!(value["options"]["maintainAspectRatio"], false);
        assert_eq!(value["options"]["scales"]["y"]["max"], 100.0);
        assert_eq!(value["options"]["scales"]["y"]["ticks"]["suffix"], "%");
        assert_eq!(value["data"]["datasets"][1]["borderDash"][0], 5);
        assert!(value["data"]["datasets"][0].get("borderDash").is_none());
    }

    #[test]
    fn test_embedded_json_escapes_script_close() {
        let chart = build_chart(&[SubjectAttendance::new("</script>", 1, 1, 100.0)]);
        let json = chart.to_embedded_json().unwrap();

        assert!(!json.contains("</script>"));
        assert!(json.contains("<\\/script>"));
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(format_tick(80.0), "80%");
        assert_eq!(format_tick(12.5), "12.5%");
        assert_eq!(
            format_tooltip("Attendance Percentage", 82.5),
            "Attendance Percentage: 82.5%"
        );
    }

    #[test]
    fn test_registration_happens_once() {
        let first = register_chart_primitives();
        let second = register_chart_primitives();

        assert!(std::ptr::eq(first, second));
        assert_eq!(first.primitives().len(), 7);
        assert!(first.register_script_args().starts_with("Chart.CategoryScale"));
    }
}
