//! The extractor seam: pluggable, trait-based text extraction from uploads.
//!
//! Default: `ByteScanExtractor` (best-effort byte decoding, deterministic,
//! fully testable). Alternative: `PdfTextExtractor` (format-aware PDF parsing
//! via `pdf_extract`), selected at startup via `ENABLE_PDF_EXTRACTION`.
//!
//! Both backends share the same normalization, the same minimum-length
//! post-condition, and the same error taxonomy, so callers cannot tell which
//! one produced a given text. `AppState` holds an `Arc<dyn TextExtractor>`.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::extraction::document::{MediaType, UploadedDocument, MIN_TEXT_CHARS};
use crate::extraction::normalize::normalize_scanned_text;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, doc: &UploadedDocument) -> Result<String, AppError>;

    /// Backend label for startup logging.
    fn backend(&self) -> &'static str;
}

/// Best-effort byte-to-character decoding. PDF and DOCX bytes are not parsed
/// structurally; their lossy decode is filtered down to printable ASCII.
/// A known approximation: scanned or heavily-compressed documents mostly
/// normalize away and then fail the minimum-length check.
pub struct ByteScanExtractor;

#[async_trait]
impl TextExtractor for ByteScanExtractor {
    async fn extract(&self, doc: &UploadedDocument) -> Result<String, AppError> {
        scan_document(doc)
    }

    fn backend(&self) -> &'static str {
        "byte-scan"
    }
}

/// Parses PDF object streams via `pdf_extract` before applying the same
/// normalization as the byte scan. PDF parsing is CPU-bound and runs on the
/// blocking pool; every other media type takes the byte-scan path.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, doc: &UploadedDocument) -> Result<String, AppError> {
        if doc.media_type != MediaType::Pdf {
            return scan_document(doc);
        }
        // The `Bytes` clone moved into the closure is a refcount bump, not a copy.
        let data = doc.bytes.clone();
        let text = tokio::task::spawn_blocking(move || parse_pdf(&data))
            .await
            .map_err(|e| AppError::Decode(format!("extraction task failed: {e}")))??;
        ensure_min_chars(&text)?;
        Ok(text)
    }

    fn backend(&self) -> &'static str {
        "pdf-extract"
    }
}

/// Sync core shared by both backends: media-type dispatch, byte scanning,
/// and the minimum-length post-condition.
fn scan_document(doc: &UploadedDocument) -> Result<String, AppError> {
    let text = match doc.media_type {
        MediaType::PlainText => decode_plain_text(&doc.bytes)?,
        MediaType::Pdf | MediaType::Docx => byte_scan(&doc.bytes),
    };
    ensure_min_chars(&text)?;
    Ok(text)
}

/// Plain text is returned exactly as decoded, no normalization.
fn decode_plain_text(bytes: &[u8]) -> Result<String, AppError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| AppError::Decode(e.to_string()))
}

fn byte_scan(bytes: &[u8]) -> String {
    normalize_scanned_text(&String::from_utf8_lossy(bytes))
}

/// Sync core of the format-aware PDF path.
fn parse_pdf(bytes: &[u8]) -> Result<String, AppError> {
    let parsed =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| AppError::Decode(e.to_string()))?;
    Ok(normalize_scanned_text(&parsed))
}

fn ensure_min_chars(text: &str) -> Result<(), AppError> {
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(AppError::InsufficientText);
    }
    Ok(())
}
