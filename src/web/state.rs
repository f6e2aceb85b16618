//! Application State
//!
//! Shared state accessible by all page handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::backend::BackendClient;
use crate::config::{Config, ServerConfig};
use crate::ocr::{LineTimetableParser, TesseractExtractor, TextExtractor, TimetableParser};
use crate::upload::UploadServices;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Backend client without a session; handlers derive per-request handles
    pub backend: BackendClient,
    /// Reads text out of uploaded timetable images
    pub extractor: Arc<dyn TextExtractor>,
    /// Turns extracted text into timetable data
    pub parser: Arc<dyn TimetableParser>,
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build the production state: Tesseract OCR and the line parser
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let backend = BackendClient::new(&config.backend)?;
        let extractor = Arc::new(TesseractExtractor::new(&config.ocr));
        let parser = Arc::new(LineTimetableParser::new()?);

        Ok(Self::new(backend, extractor, parser, config.server.clone()))
    }

    pub fn new(
        backend: BackendClient,
        extractor: Arc<dyn TextExtractor>,
        parser: Arc<dyn TimetableParser>,
        config: ServerConfig,
    ) -> Self {
        Self {
            backend,
            extractor,
            parser,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Upload collaborators, persisting through `store`
    pub fn upload_services<'a>(&'a self, store: &'a BackendClient) -> UploadServices<'a> {
        UploadServices {
            extractor: self.extractor.as_ref(),
            parser: self.parser.as_ref(),
            store,
        }
    }

    pub fn login_route(&self) -> &str {
        &self.config.login_route
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
