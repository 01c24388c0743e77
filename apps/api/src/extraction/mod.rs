//! Resume file → plain text.
//!
//! The format is chosen from the upload's file extension. PDF and DOCX
//! parsing are CPU-bound; callers run [`extract_text`] inside `spawn_blocking`.

pub mod docx;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    ExtractionFailure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    Text,
}

impl ResumeFormat {
    /// Case-insensitive match on the file extension.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Ok(ResumeFormat::Pdf),
            "docx" | "doc" => Ok(ResumeFormat::Docx),
            "txt" => Ok(ResumeFormat::Text),
            _ => Err(ExtractionError::UnsupportedFormat(extension)),
        }
    }
}

/// Extracted text, trimmed. May be empty; callers decide whether that is an error.
pub fn extract_text(bytes: &[u8], format: ResumeFormat) -> Result<String, ExtractionError> {
    match format {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map(|text| text.trim().to_string())
            .map_err(|e| ExtractionError::ExtractionFailure(format!("Failed to parse PDF: {e}"))),
        ResumeFormat::Docx => docx::extract_docx_text(bytes),
        ResumeFormat::Text => Ok(String::from_utf8_lossy(bytes).trim().to_string()),
    }
}
