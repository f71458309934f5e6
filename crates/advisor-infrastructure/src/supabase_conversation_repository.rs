//! Conversation repository backed by the hosted database.

use crate::dto::{ConversationInsertDTO, ConversationRowDTO, decode_first, decode_rows};
use crate::supabase_client::SupabaseClient;
use advisor_core::conversation::{
    ChatMessage, Conversation, ConversationRepository, NewConversation,
};
use advisor_core::{AdvisorError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

const TABLE: &str = "conversations";

/// Stores conversations in the `conversations` table.
///
/// Messages are kept as one JSON array per row and are rewritten in full on
/// every save.
pub struct SupabaseConversationRepository {
    client: SupabaseClient,
}

impl SupabaseConversationRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConversationRepository for SupabaseConversationRepository {
    async fn find_latest(&self, user_id: &str, persona_id: &str) -> Result<Option<Conversation>> {
        let rows = self
            .client
            .from(TABLE)
            .select("*")
            .eq("user_id", user_id)
            .eq("persona_id", persona_id)
            .order_desc("updated_at")
            .limit(1)
            .fetch()
            .await?;
        decode_first::<ConversationRowDTO, _>(TABLE, rows)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Conversation>> {
        let rows = self
            .client
            .from(TABLE)
            .select("*")
            .eq("user_id", user_id)
            .order_desc("updated_at")
            .fetch()
            .await?;
        Ok(decode_rows::<ConversationRowDTO, _>(TABLE, rows))
    }

    async fn insert(&self, conversation: NewConversation) -> Result<Conversation> {
        let rows = self
            .client
            .from(TABLE)
            .insert(&ConversationInsertDTO::from(&conversation))
            .await?;
        decode_first::<ConversationRowDTO, _>(TABLE, rows)?
            .ok_or_else(|| AdvisorError::data_access("conversation insert returned no row"))
    }

    async fn update_messages(
        &self,
        conversation_id: &str,
        messages: &[ChatMessage],
    ) -> Result<Conversation> {
        let rows = self
            .client
            .from(TABLE)
            .eq("id", conversation_id)
            .update(&json!({ "messages": messages, "updated_at": Utc::now() }))
            .await?;
        decode_first::<ConversationRowDTO, _>(TABLE, rows)?
            .ok_or_else(|| AdvisorError::not_found("Conversation", conversation_id))
    }

    async fn delete(&self, conversation_id: &str) -> Result<()> {
        self.client
            .from(TABLE)
            .eq("id", conversation_id)
            .delete()
            .await
    }
}
