use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

const EXTRACTION_FAILED: &str = "Could not extract text from resume";

/// Extracts the text layer of an in-memory PDF on the blocking pool.
///
/// Unreadable documents and documents without any text are both reported as a validation
/// error; the caller cannot do anything different with either.
pub async fn extract_text(pdf: Bytes) -> Result<String, AppError> {
    let size = pdf.len();
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?;

    let text = match extracted {
        Ok(text) => text,
        Err(e) => {
            warn!("PDF extraction failed ({size} bytes): {e}");
            return Err(AppError::Validation(EXTRACTION_FAILED.to_string()));
        }
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation(EXTRACTION_FAILED.to_string()));
    }

    debug!("Extracted {} characters from {size}-byte PDF", text.chars().count());
    Ok(text)
}

/// True when `file_name` has a `.pdf` extension (any case).
pub fn is_pdf_name(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(".pdf")
}
