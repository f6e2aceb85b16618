//! Timetable File Formats
//!
//! Uploaded files are classified once into a [`TimetableFormat`]; each
//! variant has its own handler in the upload form.

use std::path::Path;

/// Extensions offered by the file picker. Only images are processed today.
pub const ACCEPTED_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".pdf", ".xlsx", ".xls"];

const SPREADSHEET_CONTENT_TYPES: [&str; 2] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
];

/// A file chosen in the upload form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its content type from the extension
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            content_type: content_type_for_name(&name).to_string(),
            name,
            bytes,
        })
    }

    pub fn format(&self) -> TimetableFormat {
        TimetableFormat::detect(&self.content_type, &self.name)
    }
}

/// Supported timetable sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimetableFormat {
    /// Any `image/*` upload, read with OCR
    Image,
    Pdf,
    /// Excel workbook (`.xlsx` / `.xls`)
    Spreadsheet,
    Unsupported,
}

impl TimetableFormat {
    pub fn detect(content_type: &str, file_name: &str) -> Self {
        let content_type = content_type.trim().to_ascii_lowercase();
        let file_name = file_name.to_ascii_lowercase();

        if content_type.starts_with("image/") {
            TimetableFormat::Image
        } else if content_type == "application/pdf" {
            TimetableFormat::Pdf
        } else if file_name.ends_with(".xlsx")
            || file_name.ends_with(".xls")
            || SPREADSHEET_CONTENT_TYPES.contains(&content_type.as_str())
        {
            TimetableFormat::Spreadsheet
        } else {
            TimetableFormat::Unsupported
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimetableFormat::Image => "image",
            TimetableFormat::Pdf => "pdf",
            TimetableFormat::Spreadsheet => "spreadsheet",
            TimetableFormat::Unsupported => "unsupported",
        }
    }
}

/// Content type a browser would report for the accepted extensions
pub fn content_type_for_name(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "pdf" => "application/pdf",
        "xlsx" => SPREADSHEET_CONTENT_TYPES[0],
        "xls" => SPREADSHEET_CONTENT_TYPES[1],
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_content_type() {
        assert_eq!(TimetableFormat::detect("image/png", "t.png"), TimetableFormat::Image);
        assert_eq!(TimetableFormat::detect("image/webp", "t.webp"), TimetableFormat::Image);
        assert_eq!(TimetableFormat::detect("application/pdf", "t.pdf"), TimetableFormat::Pdf);
        assert_eq!(TimetableFormat::detect("text/plain", "t.txt"), TimetableFormat::Unsupported);
    }

    #[test]
    fn test_detect_spreadsheet_by_name() {
        assert_eq!(
            TimetableFormat::detect("application/octet-stream", "Spring.XLSX"),
            TimetableFormat::Spreadsheet
        );
        assert_eq!(TimetableFormat::detect("", "old.xls"), TimetableFormat::Spreadsheet);
        assert_eq!(
            TimetableFormat::detect("application/vnd.ms-excel", "export"),
            TimetableFormat::Spreadsheet
        );
    }

    #[test]
    fn test_content_type_wins_over_name() {
        // A PDF named like a workbook is still a PDF
        assert_eq!(TimetableFormat::detect("application/pdf", "t.xlsx"), TimetableFormat::Pdf);
    }

    #[test]
    fn test_content_type_for_name() {
        assert_eq!(content_type_for_name("week.JPG"), "image/jpeg");
        assert_eq!(content_type_for_name("week.png"), "image/png");
        assert_eq!(content_type_for_name("week.pdf"), "application/pdf");
        assert_eq!(content_type_for_name("README"), "application/octet-stream");
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timetable.png");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let file = SelectedFile::from_path(&path).unwrap();
        assert_eq!(file.name, "timetable.png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.bytes, vec![1, 2, 3]);
        assert_eq!(file.format(), TimetableFormat::Image);
    }
}
