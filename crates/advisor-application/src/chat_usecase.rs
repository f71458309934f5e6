//! One full chat turn: quota gate, history, generation, persistence.

use crate::completion_gateway::CompletionGateway;
use crate::conversation_service::ConversationService;
use crate::usage_meter::UsageMeter;
use advisor_core::conversation::{ChatMessage, Conversation};
use advisor_core::usage::QuotaStatus;
use advisor_core::{AdvisorError, Result};
use std::sync::Arc;

/// Inline reply stored when generation fails.
pub const FAILED_REPLY_APOLOGY: &str = "I apologize, but I encountered an error. Please try again.";

/// Outcome of a completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub conversation: Conversation,
    pub reply: String,
    /// True when `reply` is the inline apology rather than a generated answer
    pub reply_failed: bool,
    /// Quota after this turn was counted
    pub quota: QuotaStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// The daily limit was already reached; nothing was stored or sent.
    Blocked(QuotaStatus),
    Replied(ChatTurn),
}

/// Orchestrates a chat turn across metering, storage and generation.
pub struct ChatUseCase {
    usage_meter: Arc<UsageMeter>,
    conversations: Arc<ConversationService>,
    gateway: Arc<CompletionGateway>,
}

impl ChatUseCase {
    pub fn new(
        usage_meter: Arc<UsageMeter>,
        conversations: Arc<ConversationService>,
        gateway: Arc<CompletionGateway>,
    ) -> Self {
        Self {
            usage_meter,
            conversations,
            gateway,
        }
    }

    /// Sends `content` to the persona on behalf of `user_id`.
    ///
    /// The user's message is always persisted once the quota allows the turn.
    /// A failed generation stores a single apology in place of the reply and
    /// does not count against the quota.
    pub async fn send_message(
        &self,
        user_id: &str,
        persona_id: &str,
        content: &str,
    ) -> Result<ChatOutcome> {
        if content.trim().is_empty() {
            return Err(AdvisorError::validation("Missing content"));
        }

        let quota = self.usage_meter.check_quota(user_id).await?;
        if !quota.allowed {
            tracing::info!(user_id, persona_id, "Daily message limit reached");
            return Ok(ChatOutcome::Blocked(quota));
        }

        let mut session = self.conversations.open(user_id, persona_id).await?;
        session.push(ChatMessage::user(content));

        let (reply, reply_failed) = match self
            .gateway
            .generate_reply(persona_id, session.messages())
            .await
        {
            Ok(reply) => (reply, false),
            Err(err) => {
                tracing::warn!(user_id, persona_id, error = %err, "Reply generation failed");
                (FAILED_REPLY_APOLOGY.to_string(), true)
            }
        };
        session.push(ChatMessage::assistant(reply.clone()));

        let conversation = self.conversations.save(&mut session).await?;

        if !reply_failed {
            self.usage_meter.increment_usage(user_id).await?;
        }
        let quota = self.usage_meter.check_quota(user_id).await?;

        Ok(ChatOutcome::Replied(ChatTurn {
            conversation,
            reply,
            reply_failed,
            quota,
        }))
    }
}
