use std::path::Path;

use super::{with_temp_document, ExtractionError};

/// Extracts the text of every page, in page order, concatenated.
pub fn extract(bytes: &[u8]) -> Result<String, ExtractionError> {
    with_temp_document(bytes, ".pdf", read_pdf)
}

fn read_pdf(path: &Path) -> Result<String, ExtractionError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractionError::Pdf(e.to_string()))
}
