//! Line-based Timetable Parser
//!
//! Reads OCR output one line at a time. Two layouts are understood:
//!
//! ```text
//! Monday 09:00-10:00 Mathematics        Tuesday
//! Mon 10.15 - 11.45 Physics Lab         09:00 to 10:00 Chemistry
//! ```
//!
//! A bare day name starts a block whose time rows inherit that day.

use regex::Regex;
use serde::Serialize;

use super::{ParseError, TimetableParser};

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// One class slot in the weekly timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub subject: String,
}

#[derive(Debug, Serialize)]
struct ParsedTimetable {
    entries: Vec<TimetableEntry>,
    subjects: Vec<String>,
}

/// Parser for `<day> <start>-<end> <subject>` timetables
#[derive(Debug, Clone)]
pub struct LineTimetableParser {
    slot: Regex,
    day_header: Regex,
}

impl LineTimetableParser {
    pub fn new() -> Result<Self, regex::Error> {
        let slot = Regex::new(
            r"(?i)^(?:(?P<day>mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?[\s,:]+)?(?P<start>\d{1,2}[:.]\d{2})\s*(?:-|–|to)\s*(?P<end>\d{1,2}[:.]\d{2})\s+(?P<subject>.+?)\s*$",
        )?;
        let day_header = Regex::new(r"(?i)^(?P<day>mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?:?\s*$")?;

        Ok(Self { slot, day_header })
    }

    /// Parse text into entries, in reading order
    pub fn entries(&self, text: &str) -> Result<Vec<TimetableEntry>, ParseError> {
        let mut entries = Vec::new();
        let mut current_day: Option<&'static str> = None;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(caps) = self.day_header.captures(line) {
                current_day = day_name(&caps["day"]);
                continue;
            }

            let Some(caps) = self.slot.captures(line) else {
                tracing::trace!(line = %line, "Skipping unrecognized timetable line");
                continue;
            };

            let day = match caps.name("day") {
                Some(day) => day_name(day.as_str()),
                None => current_day,
            };
            let Some(day) = day else {
                continue;
            };

            entries.push(TimetableEntry {
                day: day.to_string(),
                start_time: normalize_time(&caps["start"])?,
                end_time: normalize_time(&caps["end"])?,
                subject: caps["subject"].to_string(),
            });
        }

        if entries.is_empty() {
            return Err(ParseError::NoEntries);
        }
        Ok(entries)
    }
}

impl TimetableParser for LineTimetableParser {
    fn parse(&self, text: &str) -> Result<serde_json::Value, ParseError> {
        let entries = self.entries(text)?;

        let mut subjects: Vec<String> = Vec::new();
        for entry in &entries {
            if !subjects.contains(&entry.subject) {
                subjects.push(entry.subject.clone());
            }
        }

        tracing::debug!(
            entries = entries.len(),
            subjects = subjects.len(),
            "Parsed timetable text"
        );

        // Serializing plain strings cannot fail
        Ok(serde_json::to_value(ParsedTimetable { entries, subjects })
            .unwrap_or(serde_json::Value::Null))
    }
}

/// Full day name for a day prefix such as `tue` or `THU`
fn day_name(prefix: &str) -> Option<&'static str> {
    let prefix = prefix.to_ascii_lowercase();
    DAYS.iter()
        .copied()
        .find(|day| day.to_ascii_lowercase().starts_with(&prefix))
}

/// `9.05` -> `09:05`
fn normalize_time(raw: &str) -> Result<String, ParseError> {
    let invalid = || ParseError::InvalidTime(raw.to_string());

    let (hours, minutes) = raw.split_once([':', '.']).ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;

    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(format!("{:02}:{:02}", hours, minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> LineTimetableParser {
        LineTimetableParser::new().unwrap()
    }

    #[test]
    fn test_inline_day_rows() {
        let text = "Monday 09:00-10:00 Mathematics\nMon 10.15 - 11.45 Physics Lab\n";
        let entries = parser().entries(text).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].day, "Monday");
        assert_eq!(entries[0].start_time, "09:00");
        assert_eq!(entries[0].subject, "Mathematics");
        assert_eq!(entries[1].start_time, "10:15");
        assert_eq!(entries[1].end_time, "11:45");
        assert_eq!(entries[1].subject, "Physics Lab");
    }

    #[test]
    fn test_day_header_blocks() {
        let text = "WEEKLY TIMETABLE\nTuesday\n9:00 to 10:00 Chemistry\n10:00 - 11:00 Biology\nThu:\n14:00-15:00 History";
        let entries = parser().entries(text).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].day, "Tuesday");
        assert_eq!(entries[0].start_time, "09:00");
        assert_eq!(entries[1].day, "Tuesday");
        assert_eq!(entries[2].day, "Thursday");
        assert_eq!(entries[2].subject, "History");
    }

    #[test]
    fn test_rows_before_any_day_are_skipped() {
        let text = "08:00-09:00 Assembly\nFriday 09:00-10:00 Art";
        let entries = parser().entries(text).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject, "Art");
    }

    #[test]
    fn test_parse_json_shape() {
        let text = "Monday 09:00-10:00 Mathematics\nWednesday 09:00-10:00 Mathematics\nWednesday 11:00-12:00 English";
        let value = parser().parse(text).unwrap();

        assert_eq!(value["entries"].as_array().unwrap().len(), 3);
        assert_eq!(value["entries"][0]["startTime"], "09:00");
        assert_eq!(value["subjects"], serde_json::json!(["Mathematics", "English"]));
    }

    #[test]
    fn test_no_entries() {
        let err = parser().parse("blurry scan\nnothing useful").unwrap_err();
        assert!(matches!(err, ParseError::NoEntries));
        assert_eq!(err.to_string(), "No timetable entries found in extracted text");
    }

    #[test]
    fn test_invalid_time() {
        let err = parser().entries("Monday 25:00-26:00 Night Class").unwrap_err();
        assert!(matches!(err, ParseError::InvalidTime(_)));
    }
}
