//! HTTP client for the external text-generation provider.
//!
//! Speaks the OpenAI-compatible chat-completions protocol. The client
//! performs exactly one generation per call, enforces a bounded timeout and
//! maps every failure to a typed [`GenerationError`]; retry policy belongs
//! to the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

mod error;
mod types;

pub use error::GenerationError;
pub use types::GenerationPrompt;

use types::{ChatMessage, ChatRequest};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An opaque text-generation capability.
///
/// The engine depends on this trait rather than on [`GenerationClient`]
/// directly so tests can substitute a canned implementation.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, GenerationError>;
}

#[derive(Clone)]
pub struct GenerationClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GenerationClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ContentGenerator for GenerationClient {
    async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: 0.7,
            max_tokens: 800,
        };

        debug!(model = %self.model, "sending generation request");

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(self.timeout)
                } else {
                    GenerationError::Transport(e.to_string())
                }
            })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(self.timeout)
            } else {
                GenerationError::Transport(e.to_string())
            }
        })?;

        if !status.is_success() {
            let message = provider_message(status.as_u16(), &text);
            warn!(status = status.as_u16(), "provider rejected generation request");
            return Err(GenerationError::Provider(message));
        }

        let parsed: Value = serde_json::from_str(&text)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        extract_content(&parsed)
    }
}

/// Pulls the generated text out of a chat-completions response body.
fn extract_content(body: &Value) -> Result<String, GenerationError> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            GenerationError::MalformedResponse("response is missing choices[0].message.content".into())
        })
}

/// Best-effort extraction of the provider's error message. The OpenAI shape
/// is `{"error": {"message": "..."}}` but some proxies flatten it to
/// `{"error": "..."}`.
fn provider_message(status: u16, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        let error = v.get("error")?;
        error
            .as_str()
            .map(str::to_string)
            .or_else(|| error.pointer("/message").and_then(Value::as_str).map(str::to_string))
    });
    message.unwrap_or_else(|| format!("provider returned status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_and_trims_content() {
        let body = json!({
            "choices": [{ "message": { "role": "assistant", "content": "  a post\n" } }]
        });
        assert_eq!(extract_content(&body).unwrap(), "a post");
    }

    #[test]
    fn missing_content_is_malformed() {
        let body = json!({ "choices": [{ "message": { "role": "assistant" } }] });
        assert!(matches!(
            extract_content(&body),
            Err(GenerationError::MalformedResponse(_))
        ));

        let body = json!({ "choices": [] });
        assert!(matches!(
            extract_content(&body),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn provider_message_reads_nested_shape() {
        let body = r#"{"error":{"message":"model overloaded","type":"server_error"}}"#;
        assert_eq!(provider_message(503, body), "model overloaded");
    }

    #[test]
    fn provider_message_reads_flat_shape() {
        let body = r#"{"error":"quota exceeded"}"#;
        assert_eq!(provider_message(429, body), "quota exceeded");
    }

    #[test]
    fn provider_message_falls_back_to_status() {
        assert_eq!(provider_message(500, "<html>boom</html>"), "provider returned status 500");
    }
}
