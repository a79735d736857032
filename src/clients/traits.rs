use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape the collaborator is asked to answer in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    /// A JSON object carrying the named string fields.
    Json { fields: Vec<String> },
}

/// One chat-style generation request: role framing plus the user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub format: OutputFormat,
}

impl OutputFormat {
    /// Instruction naming the expected keys. JSON mode endpoints require the
    /// word "JSON" somewhere in the messages.
    pub fn instruction(&self) -> Option<String> {
        match self {
            OutputFormat::Text => None,
            OutputFormat::Json { fields } => Some(format!(
                "Respond only with a JSON object with keys: {}.",
                fields.join(", ")
            )),
        }
    }
}

impl GenerationRequest {
    pub fn wants_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json { .. })
    }
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("http error: {0}")]
    Http(String),
    #[error("api error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("empty response")]
    EmptyResponse,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("generator not configured: {0}")]
    NotConfigured(String),
}

/// External text-generation service. Returns the raw completion text;
/// callers parse structured output themselves.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}
