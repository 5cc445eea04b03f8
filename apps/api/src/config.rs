use anyhow::{Context, Result};

/// Default chat-completion gateway. Override with `AI_GATEWAY_URL`.
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";

/// Default analysis model. Override with `AI_MODEL`.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

/// Application configuration loaded from environment variables.
/// Resolved once at startup so a missing credential aborts the process
/// instead of surfacing deep inside a request handler.
#[derive(Debug, Clone)]
pub struct Config {
    pub ai_gateway_url: String,
    pub ai_gateway_api_key: String,
    pub ai_model: String,
    /// Swaps the byte-scan extractor for the format-aware PDF backend.
    pub enable_pdf_extraction: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ai_gateway_url: std::env::var("AI_GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
            ai_gateway_api_key: require_env("AI_GATEWAY_API_KEY")?,
            ai_model: std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            enable_pdf_extraction: env_flag("ENABLE_PDF_EXTRACTION"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Boolean toggle: "1", "true", or "yes" (any case) enables it.
fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
