//! Chat-completions client for Groq (or any OpenAI-compatible endpoint).

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clients::traits::{GenerationClient, GenerationError, GenerationRequest};
use crate::config::{Config, GenerationConfig};

pub struct GroqClient {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    max_retries: u32,
    timeout_ms: u64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

impl GroqClient {
    pub fn new(api_key: Option<String>, cfg: &GenerationConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .context("Failed to build reqwest client with timeout")?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
            max_retries: cfg.max_retries,
            timeout_ms: cfg.timeout_ms,
        })
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::new(config.runtime.api_key.clone(), &config.generation)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn attempt(&self, api_key: &str, body: &ChatRequest<'_>) -> Result<String, GenerationError> {
        let resp = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    GenerationError::Http(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| GenerationError::Parse(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

/// Client errors other than rate limiting will not improve on retry.
fn is_retryable(err: &GenerationError) -> bool {
    match err {
        GenerationError::Api { status, .. } => *status == 429 || *status >= 500,
        GenerationError::NotConfigured(_) => false,
        _ => true,
    }
}

#[async_trait]
impl GenerationClient for GroqClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::NotConfigured("GROQ_API_KEY not set".to_string()))?;

        debug!(
            "Requesting completion (model={}, json={}, chars={})",
            self.model,
            request.wants_json(),
            request.user.len()
        );

        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: request.wants_json().then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        // Simple retry with exponential backoff
        let mut last_err = GenerationError::EmptyResponse;
        for i in 0..=self.max_retries {
            match self.attempt(api_key, &body).await {
                Ok(text) => return Ok(text),
                Err(e) if is_retryable(&e) && i < self.max_retries => {
                    warn!("Completion attempt {} failed: {}", i + 1, e);
                    let delay_ms = 200u64 * (1u64 << i);
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    last_err = e;
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::traits::OutputFormat;

    fn cfg() -> GenerationConfig {
        GenerationConfig {
            base_url: "http://127.0.0.1:9/v1/".to_string(),
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn url_drops_trailing_slash() {
        let client = GroqClient::new(Some("k".into()), &cfg()).unwrap();
        assert_eq!(client.completions_url(), "http://127.0.0.1:9/v1/chat/completions");
    }

    #[test]
    fn rate_limits_and_server_errors_retry() {
        let api = |status| GenerationError::Api {
            status,
            body: String::new(),
        };
        assert!(is_retryable(&api(429)));
        assert!(is_retryable(&api(503)));
        assert!(!is_retryable(&api(401)));
        assert!(is_retryable(&GenerationError::EmptyResponse));
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GroqClient::new(Some("   ".into()), &cfg()).unwrap();
        let request = GenerationRequest {
            system: "s".into(),
            user: "u".into(),
            format: OutputFormat::Text,
        };
        let err = client.generate(&request).await.unwrap_err();
        assert!(matches!(err, GenerationError::NotConfigured(_)));
    }
}
