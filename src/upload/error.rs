//! Upload Error Types
//!
//! The `Display` text of every variant is shown to the user as-is.

use thiserror::Error;

use crate::backend::BackendError;
use crate::ocr::{ExtractionError, ParseError};

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Please select a file")]
    MissingFile,

    #[error("Please select semester dates")]
    MissingDates,

    #[error("Invalid semester date: {0}")]
    InvalidDate(String),

    #[error("PDF processing not implemented yet")]
    PdfNotImplemented,

    #[error("Excel processing not implemented yet")]
    SpreadsheetNotImplemented,

    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("{0}")]
    Extraction(#[from] ExtractionError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    /// The backend answered with a non-2xx status
    #[error("Failed to save timetable")]
    SaveFailed,

    /// The backend could not be reached or answered garbage
    #[error("{0}")]
    Backend(BackendError),
}

impl UploadError {
    /// Rejected before any extraction or network call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            UploadError::MissingFile | UploadError::MissingDates | UploadError::InvalidDate(_)
        )
    }
}

impl From<BackendError> for UploadError {
    fn from(e: BackendError) -> Self {
        if e.is_status() {
            UploadError::SaveFailed
        } else {
            UploadError::Backend(e)
        }
    }
}
