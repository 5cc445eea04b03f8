// HTTP handler for the analyze endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::analysis::analyzer::analyze_match;
use crate::analysis::report::MatchReport;
use crate::errors::AppError;
use crate::state::AppState;

/// Request body for `POST /api/v1/resumes/analyze`.
///
/// Both fields default to empty so an absent field is reported as missing
/// input rather than a body-decoding failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description_text: String,
}

/// POST /api/v1/resumes/analyze
///
/// The extractor result is taken as a `Result` so a body that fails to
/// decode is mapped into the uniform error shape instead of Axum's default
/// 415/422 rejection.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<MatchReport>, AppError> {
    let Json(request) = request?;
    let report = analyze_match(
        &state.llm,
        &request.resume_text,
        &request.job_description_text,
    )
    .await?;
    Ok(Json(report))
}
