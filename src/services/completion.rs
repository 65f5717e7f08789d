// src/services/completion.rs
//! Upstream chat-completion client.
//!
//! The relay talks to the upstream model through [`CompletionClient`] so the
//! HTTP implementation can be swapped out in tests.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RelayConfig;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<CompletionMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// A single-turn exchange: the system instruction, then the visitor.
    pub fn single_turn(config: &RelayConfig, system: &str, user: &str) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![
                CompletionMessage {
                    role: Role::System,
                    content: system.to_string(),
                },
                CompletionMessage {
                    role: Role::User,
                    content: user.to_string(),
                },
            ],
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Option<Vec<Option<Choice>>>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionResponse {
    fn into_text(self) -> String {
        self.choices
            .and_then(|choices| choices.into_iter().next())
            .flatten()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default()
    }
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issue one completion call and return the first choice's text.
    /// A missing choice or empty content comes back as `""`.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, UpstreamError>;
}

/// OpenAI-compatible chat-completions endpoint, bearer-token authenticated.
pub struct OpenAiClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(config: &RelayConfig, api_key: impl Into<String>) -> Result<Self, UpstreamError> {
        let http = Client::builder().timeout(config.upstream_timeout).build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, UpstreamError> {
        let res = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(UpstreamError::Status { status, body });
        }

        let bytes = res.bytes().await?;
        let parsed: CompletionResponse = serde_json::from_slice(&bytes)?;
        Ok(parsed.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_in_chat_completions_shape() {
        let config = RelayConfig::default();
        let req = CompletionRequest::single_turn(&config, "be nice", "hi");
        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["max_tokens"], 300);
        assert_eq!(value["messages"][0], json!({"role": "system", "content": "be nice"}));
        assert_eq!(value["messages"][1], json!({"role": "user", "content": "hi"}));
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn first_choice_content_is_extracted() {
        let res: CompletionResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": "Hello!"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        }))
        .unwrap();
        assert_eq!(res.into_text(), "Hello!");
    }

    #[test]
    fn missing_content_becomes_empty() {
        for body in [
            json!({}),
            json!({"choices": null}),
            json!({"choices": []}),
            json!({"choices": [null]}),
            json!({"choices": [{}]}),
            json!({"choices": [{"message": null}]}),
            json!({"choices": [{"message": {"content": null}}]}),
        ] {
            let res: CompletionResponse = serde_json::from_value(body).unwrap();
            assert_eq!(res.into_text(), "");
        }
    }
}
