//! Persona-aware reply generation.

use advisor_core::completion::{CompletionOutput, CompletionProvider, CompletionRequest};
use advisor_core::conversation::ChatMessage;
use advisor_core::persona::resolve_persona;
use advisor_core::{AdvisorError, Result};
use std::sync::Arc;

/// Response-length ceiling for every reply.
pub const MAX_REPLY_TOKENS: u32 = 1024;

/// Reply used when the provider answers without a text segment.
pub const NON_TEXT_APOLOGY: &str = "I apologize, but I had trouble generating a response.";

/// Message surfaced to callers when generation fails.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to get response";

pub struct CompletionGateway {
    provider: Arc<dyn CompletionProvider>,
}

impl CompletionGateway {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Generates the persona's next reply to `history`.
    ///
    /// Unknown persona ids use the default persona's prompt. Configuration
    /// errors pass through unchanged; any other provider failure is logged
    /// and replaced by a generic upstream error.
    pub async fn generate_reply(&self, persona_id: &str, history: &[ChatMessage]) -> Result<String> {
        let persona = resolve_persona(persona_id);
        let request = CompletionRequest {
            system: persona.system_prompt.to_string(),
            messages: history.to_vec(),
            max_tokens: MAX_REPLY_TOKENS,
        };

        match self.provider.complete(request).await {
            Ok(CompletionOutput::Text(text)) => Ok(text),
            Ok(CompletionOutput::NonText { kind }) => {
                tracing::warn!(persona_id = persona.id, kind = %kind, "Completion returned no text");
                Ok(NON_TEXT_APOLOGY.to_string())
            }
            Err(err) if err.is_config() => {
                tracing::error!(error = %err, "Completion provider is not configured");
                Err(err)
            }
            Err(err) => {
                tracing::error!(persona_id = persona.id, error = %err, "Completion request failed");
                Err(AdvisorError::upstream("completion", GENERATION_FAILED_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::persona::DEFAULT_PERSONA_ID;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ScriptedProvider {
        output: Result<CompletionOutput>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(output: Result<CompletionOutput>) -> Arc<Self> {
            Arc::new(Self {
                output,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionOutput> {
            self.seen.lock().unwrap().push(request);
            self.output.clone()
        }
    }

    #[tokio::test]
    async fn test_unknown_persona_uses_default_prompt() {
        let provider = ScriptedProvider::new(Ok(CompletionOutput::Text("ok".into())));
        let gateway = CompletionGateway::new(provider.clone());
        let reply = gateway
            .generate_reply("astrologer", &[ChatMessage::user("hi")])
            .await
            .unwrap();
        assert_eq!(reply, "ok");

        let seen = provider.seen.lock().unwrap();
        let default_prompt = resolve_persona(DEFAULT_PERSONA_ID).system_prompt;
        assert_eq!(seen[0].system, default_prompt);
        assert_eq!(seen[0].max_tokens, MAX_REPLY_TOKENS);
    }

    #[tokio::test]
    async fn test_non_text_output_becomes_apology() {
        let provider = ScriptedProvider::new(Ok(CompletionOutput::NonText {
            kind: "tool_use".into(),
        }));
        let reply = CompletionGateway::new(provider)
            .generate_reply("business", &[ChatMessage::user("hi")])
            .await
            .unwrap();
        assert_eq!(reply, NON_TEXT_APOLOGY);
    }

    #[tokio::test]
    async fn test_upstream_detail_is_not_leaked() {
        let provider = ScriptedProvider::new(Err(AdvisorError::upstream(
            "anthropic",
            "HTTP 529: overloaded, request id req_123",
        )));
        let err = CompletionGateway::new(provider)
            .generate_reply("business", &[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(err.is_upstream());
        assert!(!err.to_string().contains("req_123"));
    }

    #[tokio::test]
    async fn test_config_error_passes_through() {
        let provider = ScriptedProvider::new(Err(AdvisorError::config("missing key")));
        let err = CompletionGateway::new(provider)
            .generate_reply("business", &[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(err.is_config());
    }
}
