//! Timetable Upload Form
//!
//! Holds the form's local state and runs a submission:
//!
//! 1. Validate that a file and both semester dates are present
//! 2. Extract text with the handler for the file's [`TimetableFormat`]
//! 3. Parse the text into timetable data
//! 4. `POST /api/timetable` with `{startDate, endDate, data}`
//!
//! Failures end up as the form's error message, verbatim.

mod error;
mod format;

pub use error::UploadError;
pub use format::{content_type_for_name, SelectedFile, TimetableFormat, ACCEPTED_EXTENSIONS};

use chrono::NaiveDate;

use crate::backend::TimetableStore;
use crate::models::{SemesterDates, UploadPayload};
use crate::ocr::{TextExtractor, TimetableParser};

/// Message shown after a successful upload
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Timetable uploaded successfully!";

/// Collaborators a submission calls out to
#[derive(Clone, Copy)]
pub struct UploadServices<'a> {
    pub extractor: &'a dyn TextExtractor,
    pub parser: &'a dyn TimetableParser,
    pub store: &'a dyn TimetableStore,
}

/// Which semester date a form field edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl DateField {
    /// Match a form field name (`startDate` / `endDate`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "startDate" => Some(DateField::Start),
            "endDate" => Some(DateField::End),
            _ => None,
        }
    }
}

/// Local state of the upload form
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    file: Option<SelectedFile>,
    is_processing: bool,
    error: String,
    success: String,
    dates: SemesterDates,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a file. Clears any previous error or success message.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        self.file = file;
        self.error.clear();
        self.success.clear();
    }

    pub fn set_date(&mut self, field: DateField, value: impl Into<String>) {
        match field {
            DateField::Start => self.dates.start_date = value.into(),
            DateField::End => self.dates.end_date = value.into(),
        }
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn dates(&self) -> &SemesterDates {
        &self.dates
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn success(&self) -> &str {
        &self.success
    }

    /// Submit the form.
    ///
    /// The outcome is also reflected in [`UploadForm::error`] and
    /// [`UploadForm::success`]; the processing flag is always cleared on
    /// return.
    pub async fn submit(&mut self, services: UploadServices<'_>) -> Result<(), UploadError> {
        let (file, payload_dates) = match self.validate() {
            Ok(validated) => validated,
            Err(e) => {
                self.error = e.to_string();
                return Err(e);
            }
        };

        self.is_processing = true;
        self.error.clear();
        self.success.clear();

        let result = process(&file, payload_dates, services).await;
        self.is_processing = false;

        match result {
            Ok(()) => {
                tracing::info!(file = %file.name, "Timetable uploaded");
                self.success = UPLOAD_SUCCESS_MESSAGE.to_string();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(file = %file.name, error = %e, "Timetable upload failed");
                self.error = e.to_string();
                Err(e)
            }
        }
    }

    fn validate(&self) -> Result<(SelectedFile, (NaiveDate, NaiveDate)), UploadError> {
        let file = self.file.clone().ok_or(UploadError::MissingFile)?;

        if !self.dates.is_complete() {
            return Err(UploadError::MissingDates);
        }

        let start = parse_date(&self.dates.start_date)?;
        let end = parse_date(&self.dates.end_date)?;
        Ok((file, (start, end)))
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, UploadError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| UploadError::InvalidDate(raw.to_string()))
}

async fn process(
    file: &SelectedFile,
    (start_date, end_date): (NaiveDate, NaiveDate),
    services: UploadServices<'_>,
) -> Result<(), UploadError> {
    let format = file.format();
    tracing::debug!(file = %file.name, format = format.as_str(), "Processing timetable");

    let text = match format {
        TimetableFormat::Image => extract_image(file, services.extractor).await?,
        TimetableFormat::Pdf => extract_pdf(file)?,
        TimetableFormat::Spreadsheet => extract_spreadsheet(file)?,
        TimetableFormat::Unsupported => return Err(UploadError::UnsupportedFormat),
    };

    let data = services.parser.parse(&text)?;

    let payload = UploadPayload {
        start_date,
        end_date,
        data,
    };
    services.store.save_timetable(&payload).await?;
    Ok(())
}

async fn extract_image(
    file: &SelectedFile,
    extractor: &dyn TextExtractor,
) -> Result<String, UploadError> {
    Ok(extractor.extract_text(file).await?)
}

fn extract_pdf(_file: &SelectedFile) -> Result<String, UploadError> {
    Err(UploadError::PdfNotImplemented)
}

fn extract_spreadsheet(_file: &SelectedFile) -> Result<String, UploadError> {
    Err(UploadError::SpreadsheetNotImplemented)
}
