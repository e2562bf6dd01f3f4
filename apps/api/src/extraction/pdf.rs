use std::panic::{catch_unwind, AssertUnwindSafe};

use super::ExtractionError;

/// Extracts the text of every page, in page order. Pages without any text
/// come back as empty segments and are dropped by the caller.
pub fn extract_pages(data: &[u8]) -> Result<Vec<String>, ExtractionError> {
    // pdf-extract panics on some malformed inputs instead of returning Err
    catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }))
    .map_err(|panic| {
        ExtractionError::Pdf(format!(
            "parser panicked: {}",
            panic
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("(non-string panic)")
        ))
    })?
    .map_err(|e| ExtractionError::Pdf(e.to_string()))
}
