// Prompt constants for match analysis.

/// System prompt. Fixes the analyst persona and demands bare JSON replies.
pub const ANALYZE_SYSTEM: &str = "You are an expert resume analyzer and career coach. \
    Analyze resumes against job descriptions and provide detailed, actionable feedback. \
    Always respond with valid JSON only, no markdown formatting.";

/// User prompt template. Replace `{resume_text}` and `{job_description}`
/// before sending. The schema block below is the contract `MatchReport`
/// decodes against.
pub const ANALYZE_PROMPT_TEMPLATE: &str = r#"Analyze this resume against the job description and provide a detailed analysis.

Resume:
{resume_text}

Job Description:
{job_description}

Provide your response as a JSON object with this exact structure:
{
  "matchScore": <number 0-100>,
  "atsScore": <number 0-100>,
  "matchedKeywords": [<array of keywords found in both resume and JD>],
  "missingKeywords": [<array of important keywords from JD missing in resume>],
  "strengths": [<array of 3-5 strength points>],
  "weaknesses": [<array of 3-5 weakness points>],
  "suggestions": [<array of 5-7 specific actionable suggestions>]
}

Focus on:
- Technical skills and tools mentioned
- Years of experience alignment
- Educational requirements
- Certifications and qualifications
- Industry-specific terminology
- Soft skills mentioned in the JD

Provide specific, actionable feedback."#;

/// Builds the user prompt with both texts embedded verbatim.
pub fn build_analyze_prompt(resume_text: &str, job_description: &str) -> String {
    ANALYZE_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{job_description}", job_description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_texts() {
        let prompt = build_analyze_prompt(
            "Rust engineer, nine years of systems work.",
            "Hiring a backend engineer with Rust and Kafka.",
        );
        assert!(prompt.contains("Rust engineer, nine years of systems work."));
        assert!(prompt.contains("Hiring a backend engineer with Rust and Kafka."));
    }

    #[test]
    fn test_prompt_contains_schema_fields() {
        let prompt = build_analyze_prompt("resume body", "job description body");
        for field in [
            "matchScore",
            "atsScore",
            "matchedKeywords",
            "missingKeywords",
            "strengths",
            "weaknesses",
            "suggestions",
        ] {
            assert!(prompt.contains(field), "prompt lost the {field} field");
        }
        assert!(prompt.contains("Years of experience alignment"));
        assert!(prompt.contains("Certifications and qualifications"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
    }
}
