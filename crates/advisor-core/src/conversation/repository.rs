//! Conversation repository trait.
//!
//! Defines the interface for conversation persistence operations.

use super::message::ChatMessage;
use super::model::{Conversation, NewConversation};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing conversation persistence.
///
/// This trait decouples the conversation service from the hosted database,
/// so tests can run against the in-memory store.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Finds the most recently updated conversation for a (user, persona) pair.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Conversation))`: Latest conversation
    /// - `Ok(None)`: The user has no conversation with this persona
    /// - `Err(_)`: Storage failure or a malformed row
    async fn find_latest(&self, user_id: &str, persona_id: &str) -> Result<Option<Conversation>>;

    /// Lists every conversation owned by the user.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Conversation>>;

    /// Inserts a conversation and returns the stored row with its new id.
    async fn insert(&self, conversation: NewConversation) -> Result<Conversation>;

    /// Replaces the messages of an existing conversation and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no row matches `conversation_id`.
    async fn update_messages(
        &self,
        conversation_id: &str,
        messages: &[ChatMessage],
    ) -> Result<Conversation>;

    /// Hard-deletes a conversation. Deleting a missing row is not an error.
    async fn delete(&self, conversation_id: &str) -> Result<()>;
}
