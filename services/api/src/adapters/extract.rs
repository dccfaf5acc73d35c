//! services/api/src/adapters/extract.rs
//!
//! Implements the `TextExtractionService` port. PDF uploads go through
//! `pdf-extract`; every other format is decoded as (lossy) UTF-8 text.

use async_trait::async_trait;
use legal_assistant_core::ports::{PortError, PortResult, TextExtractionService};
use std::path::Path;
use tracing::{info, warn};

/// The extraction path chosen for an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    Pdf,
    Utf8,
}

impl ExtractionMode {
    pub fn for_file(file_name: &str) -> Self {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => ExtractionMode::Pdf,
            _ => ExtractionMode::Utf8,
        }
    }
}

#[derive(Clone, Default)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn decode_utf8(file_name: &str, data: &[u8]) -> String {
        let text = String::from_utf8_lossy(data);
        if let std::borrow::Cow::Owned(_) = text {
            warn!("'{}' is not valid UTF-8; invalid sequences were replaced", file_name);
        }
        text.into_owned()
    }
}

#[async_trait]
impl TextExtractionService for DocumentTextExtractor {
    async fn extract_text(&self, file_name: &str, data: &[u8]) -> PortResult<String> {
        match ExtractionMode::for_file(file_name) {
            ExtractionMode::Pdf => {
                let bytes = data.to_vec();
                // PDF parsing is CPU-bound; keep it off the async workers.
                let text = tokio::task::spawn_blocking(move || {
                    pdf_extract::extract_text_from_mem(&bytes)
                })
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .map_err(|e| {
                    PortError::Unexpected(format!("Failed to extract text from PDF: {}", e))
                })?;
                info!(chars = text.len(), "Extracted text from PDF '{}'", file_name);
                Ok(text)
            }
            ExtractionMode::Utf8 => Ok(Self::decode_utf8(file_name, data)),
        }
    }
}
