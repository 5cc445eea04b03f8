//! The validated upload model. Size and media-type invariants are enforced
//! at construction, so an `UploadedDocument` never reaches an extractor in a
//! rejectable state.

use bytes::Bytes;

use crate::errors::AppError;

/// Upload cap in bytes. Checked before any extraction work happens.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Minimum characters a usable extraction must produce. Anything shorter is
/// treated as a failed extraction, not returned as near-empty text.
pub const MIN_TEXT_CHARS: usize = 50;

pub const MIME_PLAIN_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Media types accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    PlainText,
    Pdf,
    Docx,
}

impl MediaType {
    /// Parses a declared MIME type, tolerating parameters such as
    /// `text/plain; charset=utf-8`. Anything outside the accepted set is
    /// `None`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence {
            MIME_PLAIN_TEXT => Some(MediaType::PlainText),
            MIME_PDF => Some(MediaType::Pdf),
            MIME_DOCX => Some(MediaType::Docx),
            _ => None,
        }
    }
}

/// One uploaded resume file: raw bytes plus the declared media type.
/// Consumed once by an extractor and then dropped.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub bytes: Bytes,
    pub media_type: MediaType,
}

impl UploadedDocument {
    /// Validates the declared media type and the size cap, in that order.
    /// Both checks run before any byte of the content is interpreted.
    pub fn new(bytes: Bytes, declared_mime: Option<&str>) -> Result<Self, AppError> {
        let declared = declared_mime.unwrap_or("");
        let media_type = MediaType::from_mime(declared).ok_or_else(|| {
            AppError::UnsupportedMediaType(if declared.is_empty() {
                "(none)".to_string()
            } else {
                declared.to_string()
            })
        })?;

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::PayloadTooLarge {
                limit_mib: MAX_UPLOAD_BYTES / (1024 * 1024),
            });
        }

        Ok(Self { bytes, media_type })
    }
}
