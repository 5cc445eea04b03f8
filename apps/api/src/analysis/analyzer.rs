// Resume-to-JD match analysis via the AI gateway.

use tracing::info;

use crate::analysis::prompts::{build_analyze_prompt, ANALYZE_SYSTEM};
use crate::analysis::report::MatchReport;
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Scores a resume against a job description with a single gateway call.
///
/// Both inputs must be non-empty after trimming, checked here before any
/// network traffic. The model's JSON reply is decoded into [`MatchReport`]
/// and range-checked; a reply that decodes but carries an out-of-range
/// score is rejected, never clamped.
pub async fn analyze_match(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
) -> Result<MatchReport, AppError> {
    if resume_text.trim().is_empty() || job_description.trim().is_empty() {
        return Err(AppError::MissingInput);
    }

    let prompt = build_analyze_prompt(resume_text, job_description);
    let report: MatchReport = llm.call_json(ANALYZE_SYSTEM, &prompt).await?;
    report.validate().map_err(AppError::MalformedModelReply)?;

    info!(
        match_score = report.match_score,
        ats_score = report.ats_score,
        "analysis complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_client() -> LlmClient {
        // Never dialed in these tests; input validation fires first.
        LlmClient::new("test-key", "http://localhost:0/v1/chat/completions", "test-model")
            .expect("client config")
    }

    #[tokio::test]
    async fn test_empty_resume_rejected() {
        let llm = offline_client();
        let err = analyze_match(&llm, "", "We need a Rust engineer.")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MissingInput));
    }

    #[tokio::test]
    async fn test_empty_jd_rejected() {
        let llm = offline_client();
        let err = analyze_match(&llm, "Ten years of Rust.", "").await.unwrap_err();
        assert!(matches!(err, AppError::MissingInput));
    }

    #[tokio::test]
    async fn test_whitespace_inputs_rejected() {
        let llm = offline_client();
        let err = analyze_match(&llm, "   \n\t  ", "  \n ").await.unwrap_err();
        assert!(matches!(err, AppError::MissingInput));
    }
}
