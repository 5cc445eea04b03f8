// Match analysis: resume + job description → scored report from the model.
// All gateway traffic goes through llm_client, no direct HTTP from here.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
pub mod report;
