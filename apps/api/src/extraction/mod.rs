//! Text extraction: turns a transport-encoded resume payload into plain text.
//!
//! Unlike the model-backed stages, extraction failures are real errors: they
//! propagate to the HTTP layer instead of resolving to a fallback payload.

use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use tracing::{debug, warn};

mod docx;
mod pdf;

/// Base64 of "%PDF-", the header every PDF file starts with.
const PDF_BASE64_SIGNATURE: &str = "JVBERi";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("decoded document is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("temporary file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("Word extraction failed: {0}")]
    Word(String),

    #[error("extraction task aborted: {0}")]
    Task(String),
}

/// Declared format of an uploaded resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Plain,
    Pdf,
    Word,
}

impl FromStr for DocumentFormat {
    type Err = ExtractionError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" | "plain" => Ok(DocumentFormat::Plain),
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" | "word" => Ok(DocumentFormat::Word),
            _ => Err(ExtractionError::UnsupportedFormat(tag.to_string())),
        }
    }
}

/// Resolves the resume payload to plain text according to its declared type.
///
/// Plain payloads pass through untouched unless they are visibly base64
/// (a `data:` URL or a base64 PDF header). PDF and Word payloads are always
/// base64 and are parsed on the blocking pool.
pub async fn extract_text(content: &str, resume_type: &str) -> Result<String, ExtractionError> {
    let format: DocumentFormat = resume_type.parse()?;
    debug!(?format, payload_len = content.len(), "Extracting resume text");

    let text = match format {
        DocumentFormat::Plain if looks_encoded(content) => {
            String::from_utf8(decode_payload(content)?)?
        }
        DocumentFormat::Plain => content.to_string(),
        DocumentFormat::Pdf => {
            let bytes = decode_payload(content)?;
            run_blocking(move || pdf::extract(&bytes)).await?
        }
        DocumentFormat::Word => {
            let bytes = decode_payload(content)?;
            run_blocking(move || docx::extract(&bytes)).await?
        }
    };

    if text.trim().is_empty() {
        warn!(?format, "Extracted resume text is empty");
    }
    Ok(text)
}

fn looks_encoded(content: &str) -> bool {
    let content = content.trim_start();
    content.starts_with("data:") || content.starts_with(PDF_BASE64_SIGNATURE)
}

/// Decodes standard base64, accepting an optional `data:<mime>;base64,` prefix
/// and line-wrapped input.
fn decode_payload(content: &str) -> Result<Vec<u8>, ExtractionError> {
    let body = strip_data_url(content);
    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

fn strip_data_url(content: &str) -> &str {
    let content = content.trim();
    if content.starts_with("data:") {
        if let Some((_, body)) = content.split_once(',') {
            return body;
        }
    }
    content
}

/// Runs a parser on the blocking pool. A panic inside the parser comes back
/// as `ExtractionError::Task`.
async fn run_blocking<F>(parse: F) -> Result<String, ExtractionError>
where
    F: FnOnce() -> Result<String, ExtractionError> + Send + 'static,
{
    tokio::task::spawn_blocking(parse)
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?
}

/// Writes `bytes` to a fresh temporary file and hands its path to `read`.
/// The file is unlinked when this returns, whether `read` succeeded, failed
/// or panicked.
fn with_temp_document<T>(
    bytes: &[u8],
    suffix: &str,
    read: impl FnOnce(&Path) -> Result<T, ExtractionError>,
) -> Result<T, ExtractionError> {
    let mut file = tempfile::Builder::new()
        .prefix("resume-")
        .suffix(suffix)
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    read(file.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_tags() {
        assert_eq!("txt".parse::<DocumentFormat>().unwrap(), DocumentFormat::Plain);
        assert_eq!("PDF".parse::<DocumentFormat>().unwrap(), DocumentFormat::Pdf);
        assert_eq!("docx".parse::<DocumentFormat>().unwrap(), DocumentFormat::Word);
        assert_eq!(" word ".parse::<DocumentFormat>().unwrap(), DocumentFormat::Word);
    }

    #[tokio::test]
    async fn test_unsupported_type_is_rejected_not_treated_as_text() {
        let err = extract_text("Jane Doe, Rust engineer", "xlsx").await.unwrap_err();
        match err {
            ExtractionError::UnsupportedFormat(tag) => assert_eq!(tag, "xlsx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_plain_text_passes_through() {
        let text = extract_text("Jane Doe\nSenior Engineer", "txt").await.unwrap();
        assert_eq!(text, "Jane Doe\nSenior Engineer");
    }

    #[tokio::test]
    async fn test_plain_data_url_is_decoded() {
        let encoded = STANDARD.encode("Jane Doe\nSkills: Rust");
        let payload = format!("data:text/plain;base64,{encoded}");
        let text = extract_text(&payload, "txt").await.unwrap();
        assert_eq!(text, "Jane Doe\nSkills: Rust");
    }

    #[test]
    fn test_decode_payload_ignores_line_wrapping() {
        let encoded = STANDARD.encode("a fairly long line of resume text to wrap");
        let (head, tail) = encoded.split_at(20);
        let wrapped = format!("{head}\n{tail}\n");
        assert_eq!(
            decode_payload(&wrapped).unwrap(),
            b"a fairly long line of resume text to wrap"
        );
    }

    #[tokio::test]
    async fn test_invalid_base64_pdf_is_extraction_error() {
        let err = extract_text("not base64 at all!!", "pdf").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Decode(_)));
    }

    #[tokio::test]
    async fn test_garbage_pdf_is_extraction_error() {
        let payload = STANDARD.encode(b"%PDF-1.4 this is not really a pdf");
        let err = extract_text(&payload, "pdf").await.unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Pdf(_) | ExtractionError::Task(_)
        ));
    }

    #[test]
    fn test_temp_document_removed_after_success() {
        let mut seen: Option<PathBuf> = None;
        let out = with_temp_document(b"hello", ".txt", |path| {
            seen = Some(path.to_path_buf());
            Ok(std::fs::read_to_string(path)?)
        })
        .unwrap();
        assert_eq!(out, "hello");
        assert!(!seen.unwrap().exists());
    }

    #[test]
    fn test_temp_document_removed_after_failure() {
        let mut seen: Option<PathBuf> = None;
        let result: Result<(), _> = with_temp_document(b"hello", ".pdf", |path| {
            seen = Some(path.to_path_buf());
            Err(ExtractionError::Pdf("boom".to_string()))
        });
        assert!(result.is_err());
        assert!(!seen.unwrap().exists());
    }
}
