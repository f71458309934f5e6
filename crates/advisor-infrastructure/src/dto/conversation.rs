//! Conversation row DTOs.

use super::require_non_blank;
use advisor_core::AdvisorError;
use advisor_core::conversation::{ChatMessage, Conversation, NewConversation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const TABLE: &str = "conversations";

/// A row of the `conversations` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationRowDTO {
    pub id: String,
    pub user_id: String,
    pub persona_id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Stored as a JSON array of `{role, content}` objects.
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ConversationRowDTO> for Conversation {
    type Error = AdvisorError;

    fn try_from(row: ConversationRowDTO) -> Result<Self, Self::Error> {
        require_non_blank(TABLE, "id", &row.id)?;
        require_non_blank(TABLE, "user_id", &row.user_id)?;
        require_non_blank(TABLE, "persona_id", &row.persona_id)?;
        Ok(Conversation {
            id: row.id,
            user_id: row.user_id,
            persona_id: row.persona_id,
            title: row.title.unwrap_or_default(),
            messages: row.messages,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert payload; the database assigns id and timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationInsertDTO<'a> {
    pub user_id: &'a str,
    pub persona_id: &'a str,
    pub title: &'a str,
    pub messages: &'a [ChatMessage],
}

impl<'a> From<&'a NewConversation> for ConversationInsertDTO<'a> {
    fn from(conversation: &'a NewConversation) -> Self {
        Self {
            user_id: &conversation.user_id,
            persona_id: &conversation.persona_id,
            title: &conversation.title,
            messages: &conversation.messages,
        }
    }
}
