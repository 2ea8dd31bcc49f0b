//! Chat-completion fallback against an OpenAI-compatible `/chat/completions` endpoint.
//!
//! A single request per call: the configured system instruction, the user's text,
//! a small `max_tokens` bound and a fixed temperature.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;
use crate::error::CompletionError;

#[async_trait]
pub trait CompletionSource: Send + Sync {
    /// Return the generated text, trimmed.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [RequestMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    config: CompletionConfig,
}

impl OpenAiClient {
    pub fn new(config: &CompletionConfig, api_key: String) -> Self {
        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
            config: config.clone(),
        }
    }
}

/// Pull the first choice's text out of a success body.
fn extract_content(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|text| text.trim().to_string())
        .ok_or_else(|| CompletionError::MalformedResponse("no message content".into()))
}

/// Prefer the provider's `error.message`, else the raw body.
fn provider_message(body: String) -> String {
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body,
    }
}

#[async_trait]
impl CompletionSource for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                RequestMessage {
                    role: "system",
                    content: &self.config.system_prompt,
                },
                RequestMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Provider {
                status: status.as_u16(),
                message: provider_message(body),
            });
        }

        let text = extract_content(&body)?;
        tracing::debug!(model = %self.config.model, chars = text.chars().count(), "completion received");
        Ok(text)
    }
}
