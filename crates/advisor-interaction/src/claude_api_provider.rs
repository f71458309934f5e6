//! ClaudeApiProvider - Direct REST API implementation for Claude.
//!
//! Calls the Anthropic Messages API with a persona's system prompt and the
//! conversation history, returning the first text block of the reply.

use advisor_core::completion::{CompletionOutput, CompletionProvider, CompletionRequest};
use advisor_core::conversation::ChatMessage;
use advisor_core::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";
const BASE_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const SERVICE: &str = "anthropic";

/// Completion provider that talks to the Claude HTTP API.
#[derive(Clone)]
pub struct ClaudeApiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeApiProvider {
    /// Creates a new provider with the provided API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_CLAUDE_MODEL.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the provider at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &CreateMessageRequest<'_>) -> Result<CompletionOutput> {
        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                AdvisorError::upstream(SERVICE, format!("Claude API request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Claude error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: CreateMessageResponse = response.json().await.map_err(|err| {
            AdvisorError::upstream(SERVICE, format!("Failed to parse Claude response: {err}"))
        })?;

        Ok(extract_output(parsed))
    }
}

#[async_trait]
impl CompletionProvider for ClaudeApiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionOutput> {
        if self.api_key.trim().is_empty() {
            return Err(AdvisorError::config("ANTHROPIC_API_KEY is not configured"));
        }

        let body = CreateMessageRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: &request.system,
            messages: &request.messages,
        };

        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            "Sending Claude completion request"
        );
        self.send_request(&body).await
    }
}

// ChatMessage already serializes as {"role": "user"|"assistant", "content": "..."}.
#[derive(Serialize)]
struct CreateMessageRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CreateMessageResponse {
    content: Vec<ContentBlockResponse>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlockResponse {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "tool_use")]
    ToolUse,
    #[serde(rename = "thinking")]
    Thinking,
    #[serde(other)]
    Other,
}

impl ContentBlockResponse {
    fn kind(&self) -> &'static str {
        match self {
            ContentBlockResponse::Text { .. } => "text",
            ContentBlockResponse::ToolUse => "tool_use",
            ContentBlockResponse::Thinking => "thinking",
            ContentBlockResponse::Other => "unknown",
        }
    }
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_output(response: CreateMessageResponse) -> CompletionOutput {
    let first_kind = response
        .content
        .first()
        .map(ContentBlockResponse::kind)
        .unwrap_or("empty");

    response
        .content
        .into_iter()
        .find_map(|block| match block {
            ContentBlockResponse::Text { text } => Some(CompletionOutput::Text(text)),
            _ => None,
        })
        .unwrap_or_else(|| CompletionOutput::NonText {
            kind: first_kind.to_string(),
        })
}

fn map_http_error(status: StatusCode, body: String) -> AdvisorError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);
    AdvisorError::upstream(SERVICE, format!("HTTP {}: {message}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> CompletionOutput {
        extract_output(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_first_text_block_is_returned() {
        let output = parse(
            r#"{"content":[{"type":"thinking","thinking":"..."},{"type":"text","text":"Hello"},{"type":"text","text":"Again"}]}"#,
        );
        assert_eq!(output, CompletionOutput::Text("Hello".to_string()));
    }

    #[test]
    fn test_non_text_response_reports_kind() {
        let output = parse(r#"{"content":[{"type":"tool_use","id":"t1","name":"x","input":{}}]}"#);
        assert_eq!(
            output,
            CompletionOutput::NonText {
                kind: "tool_use".to_string()
            }
        );

        let empty = parse(r#"{"content":[]}"#);
        assert_eq!(
            empty,
            CompletionOutput::NonText {
                kind: "empty".to_string()
            }
        );
    }

    #[test]
    fn test_http_error_uses_api_message() {
        let err = map_http_error(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"type":"error","error":{"type":"rate_limit_error","message":"Slow down"}}"#
                .to_string(),
        );
        assert!(err.is_upstream());
        assert!(err.to_string().contains("Slow down"));
    }

    #[test]
    fn test_request_serializes_history() {
        let messages = vec![ChatMessage::user("Hi"), ChatMessage::assistant("Hello")];
        let body = CreateMessageRequest {
            model: DEFAULT_CLAUDE_MODEL,
            max_tokens: 1024,
            system: "You are helpful",
            messages: &messages,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["max_tokens"], 1024);
        assert_eq!(value["messages"][1]["role"], "assistant");
    }

    #[tokio::test]
    async fn test_blank_key_fails_before_network() {
        let provider = ClaudeApiProvider::new("  ").with_base_url("http://127.0.0.1:9");
        let err = provider
            .complete(CompletionRequest {
                system: "s".to_string(),
                messages: vec![ChatMessage::user("hi")],
                max_tokens: 1024,
            })
            .await
            .unwrap_err();
        assert!(err.is_config());
    }
}
