//! Document text extraction — turns an uploaded résumé into lowercase plain text.
//!
//! Dispatch is by declared format (derived from the filename extension).
//! Unknown formats yield empty text instead of an error; a corrupt PDF or DOCX
//! surfaces an `ExtractionError` so the caller can report that one candidate
//! as failed without aborting a batch.

pub mod docx;
pub mod pdf;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX archive is unreadable: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("DOCX body is malformed: {0}")]
    Xml(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Declared format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Unsupported,
}

impl DocumentFormat {
    /// Derives the format from a filename extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else if lower.ends_with(".docx") {
            DocumentFormat::Docx
        } else {
            DocumentFormat::Unsupported
        }
    }
}

/// An uploaded document: opaque bytes plus the format they claim to be.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub filename: String,
    pub format: DocumentFormat,
    pub data: Bytes,
}

impl RawDocument {
    pub fn new(filename: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let filename = filename.into();
        let format = DocumentFormat::from_filename(&filename);
        Self {
            filename,
            format,
            data: data.into(),
        }
    }
}

/// Extracts all pages/paragraphs in document order, joined by single spaces
/// and lowercased.
pub fn extract(document: &RawDocument) -> Result<String, ExtractionError> {
    let segments = match document.format {
        DocumentFormat::Pdf => pdf::extract_pages(&document.data)?,
        DocumentFormat::Docx => docx::extract_paragraphs(&document.data)?,
        DocumentFormat::Unsupported => {
            warn!(
                filename = %document.filename,
                "Unsupported document format; treating as empty text"
            );
            return Ok(String::new());
        }
    };

    let text = join_segments(&segments);
    debug!(
        filename = %document.filename,
        segments = segments.len(),
        chars = text.len(),
        "Extracted document text"
    );
    Ok(text)
}

fn join_segments(segments: &[String]) -> String {
    segments
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
