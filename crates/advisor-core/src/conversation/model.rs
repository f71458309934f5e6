//! Conversation domain model.
//!
//! A conversation is the message history between one user and one persona.
//! The store may hold several historical rows for the same pair; the live one
//! is always the most recently updated.

use super::message::{ChatMessage, MessageRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title used when no user message is available to derive one.
pub const DEFAULT_TITLE: &str = "New Conversation";

/// Number of characters of the first user message kept as the title.
pub const TITLE_MAX_CHARS: usize = 50;

/// A stored conversation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub user_id: String,
    pub persona_id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// Payload for inserting a conversation; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConversation {
    pub user_id: String,
    pub persona_id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
}

/// Derives a title from the first user message.
///
/// Takes the first [`TITLE_MAX_CHARS`] characters (not bytes) and falls back
/// to [`DEFAULT_TITLE`] when there is no non-empty user message.
pub fn derive_title(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .find(|message| message.role == MessageRole::User)
        .map(|message| message.content.chars().take(TITLE_MAX_CHARS).collect::<String>())
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}
