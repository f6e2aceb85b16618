//! Timetable Text Extraction
//!
//! Two collaborators turn an uploaded timetable into structured data:
//! a [`TextExtractor`] reads the text out of an image and a
//! [`TimetableParser`] turns that text into the JSON the backend stores.

mod parser;
mod tesseract;

pub use parser::{LineTimetableParser, TimetableEntry};
pub use tesseract::TesseractExtractor;

use async_trait::async_trait;
use thiserror::Error;

use crate::upload::SelectedFile;

/// Reads text out of a timetable image
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, file: &SelectedFile) -> Result<String, ExtractionError>;
}

/// Turns extracted text into timetable data
pub trait TimetableParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<serde_json::Value, ParseError>;
}

/// Errors from text extraction
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to run OCR: {0}")]
    Io(#[from] std::io::Error),

    #[error("OCR timed out after {0} seconds")]
    Timeout(u64),

    #[error("OCR failed: {0}")]
    Failed(String),

    #[error("No text found in image")]
    NoText,
}

/// Errors from timetable parsing
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("No timetable entries found in extracted text")]
    NoEntries,

    #[error("Invalid time '{0}' in timetable")]
    InvalidTime(String),
}
