use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as the uniform `{ "error": string }` body; upstream
/// and model-reply detail is logged at the boundary and never reaches the
/// body.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resume text or job description absent or empty. No upstream call is
    /// made when this fires.
    #[error("Resume text and job description are required")]
    MissingInput,

    /// Multipart request carried no `file` field.
    #[error("No file provided")]
    MissingFile,

    /// Declared media type outside the accepted set (TXT, PDF, DOCX).
    #[error("Unsupported file type: {0}. Please upload a PDF, DOCX, or TXT file.")]
    UnsupportedMediaType(String),

    /// Upload over the size cap, rejected before any extraction work.
    #[error("File size must be less than {limit_mib}MB")]
    PayloadTooLarge { limit_mib: usize },

    /// Extraction finished but produced too little text to analyze.
    #[error("Could not extract sufficient text from the file. Please ensure your resume has readable text content.")]
    InsufficientText,

    /// Byte stream could not be decoded for its declared media type.
    #[error("Failed to read file content")]
    Decode(String),

    /// Malformed multipart payload.
    #[error("Invalid upload: {0}")]
    Multipart(String),

    /// Request body the JSON extractor could not decode.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Gateway answered 429.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Gateway answered 402, credits depleted.
    #[error("AI credits depleted. Please add credits to continue.")]
    QuotaExhausted,

    /// Any other gateway failure: transport error or non-success status.
    #[error("Failed to analyze resume")]
    Upstream(String),

    /// Model reply did not decode into the report shape. The raw reply is
    /// logged where it was parsed; the caller only sees a generic message.
    #[error("Failed to parse AI response")]
    MalformedModelReply(String),

    /// Invalid configuration that slipped past startup.
    #[error("Service is not configured correctly")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingInput | AppError::MissingFile => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType(_)
            | AppError::PayloadTooLarge { .. }
            | AppError::InsufficientText => StatusCode::BAD_REQUEST,
            AppError::Decode(detail) => {
                tracing::warn!("decode failure: {detail}");
                StatusCode::BAD_REQUEST
            }
            AppError::Multipart(detail) => {
                tracing::warn!("multipart failure: {detail}");
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidBody(detail) => {
                tracing::warn!("body rejection: {detail}");
                StatusCode::BAD_REQUEST
            }
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
            AppError::Upstream(detail) => {
                tracing::error!("gateway failure: {detail}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::MalformedModelReply(detail) => {
                tracing::error!("malformed model reply: {detail}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Config(detail) => {
                tracing::error!("configuration error: {detail}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::RateLimited => AppError::RateLimited,
            LlmError::QuotaExhausted => AppError::QuotaExhausted,
            LlmError::Api { status, message } => {
                AppError::Upstream(format!("status {status}: {message}"))
            }
            LlmError::Http(e) => AppError::Upstream(e.to_string()),
            LlmError::EmptyContent => {
                AppError::MalformedModelReply("reply carried no text content".to_string())
            }
            LlmError::Parse(e) => AppError::MalformedModelReply(e.to_string()),
            LlmError::Configuration(msg) => AppError::Config(msg),
        }
    }
}

// Extractor rejections fold into the same uniform error shape; the
// framework's own 415/422 responses never reach callers.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Multipart(rejection.body_text())
    }
}
