//! Tesseract Extractor
//!
//! Pipes image bytes through the `tesseract` command line tool.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{ExtractionError, TextExtractor};
use crate::config::OcrConfig;
use crate::upload::SelectedFile;

/// Runs `<command> stdin stdout -l <language>` per image
#[derive(Debug, Clone)]
pub struct TesseractExtractor {
    command: String,
    language: String,
    timeout: Duration,
}

impl TesseractExtractor {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            command: config.command.clone(),
            language: config.language.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn run(&self, image: &[u8]) -> Result<String, ExtractionError> {
        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l", &self.language])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // A process that dies early closes the pipe; its exit status says why
            if let Err(e) = stdin.write_all(image).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
            // Closing stdin tells tesseract the image is complete
            drop(stdin);
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ExtractionError::Failed(if stderr.is_empty() {
                format!("{} exited with {}", self.command, output.status)
            } else {
                stderr
            }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl TextExtractor for TesseractExtractor {
    async fn extract_text(&self, file: &SelectedFile) -> Result<String, ExtractionError> {
        tracing::info!(
            file = %file.name,
            bytes = file.bytes.len(),
            "Running OCR on timetable image"
        );

        let text = tokio::time::timeout(self.timeout, self.run(&file.bytes))
            .await
            .map_err(|_| ExtractionError::Timeout(self.timeout.as_secs()))??;

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }

        tracing::debug!(chars = text.len(), "OCR finished");
        Ok(text)
    }
}
