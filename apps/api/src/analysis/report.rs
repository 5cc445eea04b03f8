//! The match report contract returned to callers.

use serde::{Deserialize, Serialize};

/// Analysis verdict for one resume/job-description pair.
///
/// Deserialization is strict: every field is required, unknown fields are
/// rejected, and `validate` enforces the numeric bounds the prompt promises.
/// A model reply that deviates from this shape is a hard failure; no
/// partial report is ever built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MatchReport {
    /// Aggregate resume/job-description compatibility, 0-100.
    pub match_score: u32,
    /// Estimated applicant-tracking-system readability, 0-100.
    pub ats_score: u32,
    /// Keywords present in both the resume and the job description.
    pub matched_keywords: Vec<String>,
    /// Important job-description keywords absent from the resume.
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

impl MatchReport {
    /// Bounds check on the score fields. Serde already guarantees presence
    /// and integer types; scores outside 0-100 are rejected, never clamped.
    pub fn validate(&self) -> Result<(), String> {
        if self.match_score > 100 {
            return Err(format!("matchScore {} is outside 0-100", self.match_score));
        }
        if self.ats_score > 100 {
            return Err(format!("atsScore {} is outside 0-100", self.ats_score));
        }
        Ok(())
    }
}
