//! Axum route handler for resume parsing.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::document::UploadedDocument;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub text: String,
}

/// POST /api/v1/resumes/parse
///
/// Accepts a multipart form with a single `file` field, validates the upload
/// (media type, size cap), and returns the extracted text. The file is not
/// retained past the response. Fields other than `file` are ignored. A
/// request that is not well-formed multipart is mapped into the uniform
/// error shape.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let mut multipart = multipart?;
    let mut upload: Option<UploadedDocument> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Multipart(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue; // unread fields are drained when the next one is polled
        }
        let declared = field.content_type().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Multipart(e.to_string()))?;
        upload = Some(UploadedDocument::new(data, declared.as_deref())?);
        break;
    }

    let doc = upload.ok_or(AppError::MissingFile)?;
    let text = state.extractor.extract(&doc).await?;
    info!(
        bytes = doc.bytes.len(),
        chars = text.chars().count(),
        "resume parsed"
    );

    Ok(Json(ParseResumeResponse { text }))
}
