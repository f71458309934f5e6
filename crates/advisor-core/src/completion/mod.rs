//! Text-generation provider port.

use crate::conversation::ChatMessage;
use crate::error::Result;
use async_trait::async_trait;

/// A generation request: system instruction plus ordered history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

/// What the provider returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutput {
    /// The first text-bearing segment of the response
    Text(String),
    /// The response carried no text segment; `kind` names what it did carry
    NonText { kind: String },
}

/// Hosted text-generation API.
///
/// Implementations return `AdvisorError::Config` when their credential is
/// missing, before any network call, and `AdvisorError::Upstream` for
/// provider-side failures.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionOutput>;
}
