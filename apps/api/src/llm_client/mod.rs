//! Gateway client, the single point of entry for all chat-completion calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to the AI gateway directly.
//! The gateway speaks the OpenAI-style chat-completions protocol; the model's
//! reply is the content of the first choice.
//!
//! One outbound request per call. Nothing here retries; a failed analysis
//! is re-run by the user re-submitting, not by the backend.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway rate limit exceeded")]
    RateLimited,

    #[error("gateway credits exhausted")]
    QuotaExhausted,

    #[error("gateway error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,

    #[error("configuration error: {0}")]
    Configuration(String),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// The assistant text of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

/// The single chat-completion client used by all services.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    /// Builds the client. An empty credential or endpoint fails here so
    /// misconfiguration surfaces at startup, not inside a request.
    pub fn new(api_key: &str, url: &str, model: &str) -> Result<Self, LlmError> {
        if api_key.trim().is_empty() {
            return Err(LlmError::Configuration(
                "gateway API key is not set".to_string(),
            ));
        }
        if url.trim().is_empty() {
            return Err(LlmError::Configuration(
                "gateway URL is not set".to_string(),
            ));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one chat-completion request and returns the assistant text.
    /// 429 and 402 are classified; every other non-success status becomes
    /// `Api` with the upstream body as the message.
    pub async fn call(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("gateway returned {status}: {body}");
            return Err(match status.as_u16() {
                429 => LlmError::RateLimited,
                402 => LlmError::QuotaExhausted,
                code => LlmError::Api {
                    status: code,
                    message: body,
                },
            });
        }

        let reply: ChatResponse = response.json().await?;
        let text = reply.text().ok_or(LlmError::EmptyContent)?;
        debug!("gateway reply: {} chars", text.len());
        Ok(text.to_string())
    }

    /// Calls the gateway and decodes the reply as JSON, stripping any
    /// markdown fences the model wrapped it in despite instructions.
    /// The raw reply is logged when it does not parse.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        system: &str,
        user: &str,
    ) -> Result<T, LlmError> {
        let raw = self.call(system, user).await?;
        let cleaned = strip_json_fences(&raw);
        serde_json::from_str(cleaned).map_err(|e| {
            error!("unparseable model reply: {e}; raw reply: {raw}");
            LlmError::Parse(e)
        })
    }
}

/// Strips a leading/trailing markdown code fence (```json … ``` or
/// ``` … ```) from model output. A missing closing fence is tolerated.
fn strip_json_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_start();
    match rest.strip_suffix("```") {
        Some(inner) => inner.trim_end(),
        None => rest,
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post, Router};

    use super::*;
    use crate::errors::AppError;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_unclosed_fence() {
        let input = "```json\n{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_fenced_and_bare_json_parse_identically() {
        let bare = r#"{"matchScore": 85, "matchedKeywords": ["Python", "AWS"]}"#;
        let fenced = format!("```json\n{bare}\n```");

        let from_bare: serde_json::Value = serde_json::from_str(strip_json_fences(bare)).unwrap();
        let from_fenced: serde_json::Value =
            serde_json::from_str(strip_json_fences(&fenced)).unwrap();
        assert_eq!(from_bare, from_fenced);
    }

    #[test]
    fn test_response_text_takes_first_choice() {
        let body = r#"{
            "choices": [
                {"message": {"content": "first"}},
                {"message": {"content": "second"}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.text(), Some("first"));
    }

    #[test]
    fn test_response_text_empty_choices_is_none() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_new_rejects_empty_api_key() {
        let err = LlmClient::new("", "https://gateway.example/v1/chat/completions", "model")
            .err()
            .unwrap();
        assert!(matches!(err, LlmError::Configuration(_)));
    }

    #[test]
    fn test_new_rejects_empty_url() {
        let err = LlmClient::new("key", "  ", "model").err().unwrap();
        assert!(matches!(err, LlmError::Configuration(_)));
    }

    // Wire-level coverage: each test binds a throwaway gateway on an
    // ephemeral port and points the real client at it, so the status
    // classification in `call` is exercised over an actual HTTP exchange.

    async fn stub_gateway(status: StatusCode, reply: &'static str) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move || async move { (status, reply) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/chat/completions")
    }

    #[tokio::test]
    async fn test_call_classifies_429_as_rate_limited() {
        let url = stub_gateway(StatusCode::TOO_MANY_REQUESTS, "slow down").await;
        let client = LlmClient::new("test-key", &url, "test-model").unwrap();

        let err = client.call("system", "user").await.err().unwrap();
        assert!(matches!(err, LlmError::RateLimited));
        assert!(matches!(AppError::from(err), AppError::RateLimited));
    }

    #[tokio::test]
    async fn test_call_classifies_402_as_quota_exhausted() {
        let url = stub_gateway(StatusCode::PAYMENT_REQUIRED, "credits gone").await;
        let client = LlmClient::new("test-key", &url, "test-model").unwrap();

        let err = client.call("system", "user").await.err().unwrap();
        assert!(matches!(err, LlmError::QuotaExhausted));
        assert!(matches!(AppError::from(err), AppError::QuotaExhausted));
    }

    #[tokio::test]
    async fn test_call_surfaces_other_statuses_as_api_errors() {
        let url = stub_gateway(StatusCode::SERVICE_UNAVAILABLE, "down for maintenance").await;
        let client = LlmClient::new("test-key", &url, "test-model").unwrap();

        match client.call("system", "user").await.err().unwrap() {
            LlmError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "down for maintenance");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_call_returns_first_choice_content() {
        let url = stub_gateway(
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":"the reply"}}]}"#,
        )
        .await;
        let client = LlmClient::new("test-key", &url, "test-model").unwrap();

        let text = client.call("system", "user").await.unwrap();
        assert_eq!(text, "the reply");
    }

    #[tokio::test]
    async fn test_call_empty_choices_is_empty_content() {
        let url = stub_gateway(StatusCode::OK, r#"{"choices":[]}"#).await;
        let client = LlmClient::new("test-key", &url, "test-model").unwrap();

        let err = client.call("system", "user").await.err().unwrap();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_call_json_strips_fences_from_wire_reply() {
        let url = stub_gateway(
            StatusCode::OK,
            r#"{"choices":[{"message":{"content":"```json\n{\"matchScore\": 85, \"matchedKeywords\": [\"Python\", \"AWS\"]}\n```"}}]}"#,
        )
        .await;
        let client = LlmClient::new("test-key", &url, "test-model").unwrap();

        let value: serde_json::Value = client.call_json("system", "user").await.unwrap();
        assert_eq!(value["matchScore"], 85);
        assert_eq!(value["matchedKeywords"][0], "Python");
    }
}
