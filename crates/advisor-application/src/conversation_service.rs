//! Conversation persistence for chat sessions.
//!
//! A [`ConversationSession`] is the in-memory working copy of one
//! user/persona conversation. It remembers the id of the row it was loaded
//! from or last saved to, so the first save inserts and every later save
//! updates the same row.

use advisor_core::analytics::{AnalyticsEvent, AnalyticsRepository};
use advisor_core::conversation::{
    ChatMessage, Conversation, ConversationRepository, NewConversation, derive_title,
};
use advisor_core::{AdvisorError, Result};
use std::sync::Arc;

/// Working copy of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    user_id: String,
    persona_id: String,
    conversation_id: Option<String>,
    messages: Vec<ChatMessage>,
}

impl ConversationSession {
    /// Starts a fresh session with no stored row.
    pub fn new(user_id: impl Into<String>, persona_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            persona_id: persona_id.into(),
            conversation_id: None,
            messages: Vec::new(),
        }
    }

    pub fn from_conversation(conversation: Conversation) -> Self {
        Self {
            user_id: conversation.user_id,
            persona_id: conversation.persona_id,
            conversation_id: Some(conversation.id),
            messages: conversation.messages,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn persona_id(&self) -> &str {
        &self.persona_id
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Drops the cached id and messages; the next save inserts a new row.
    pub fn reset(&mut self) {
        self.conversation_id = None;
        self.messages.clear();
    }
}

/// Loads, saves and deletes conversations.
pub struct ConversationService {
    conversations: Arc<dyn ConversationRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
}

impl ConversationService {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        analytics: Arc<dyn AnalyticsRepository>,
    ) -> Self {
        Self {
            conversations,
            analytics,
        }
    }

    /// Most recently updated conversation for the pair.
    ///
    /// # Returns
    ///
    /// * `Err(AdvisorError::NotFound)` - The user has no conversation with this persona
    pub async fn load_latest(&self, user_id: &str, persona_id: &str) -> Result<Conversation> {
        self.conversations
            .find_latest(user_id, persona_id)
            .await?
            .ok_or_else(|| AdvisorError::not_found("Conversation", format!("{user_id}/{persona_id}")))
    }

    /// Resumes the latest conversation, or starts an empty session.
    pub async fn open(&self, user_id: &str, persona_id: &str) -> Result<ConversationSession> {
        match self.load_latest(user_id, persona_id).await {
            Ok(conversation) => Ok(ConversationSession::from_conversation(conversation)),
            Err(err) if err.is_not_found() => Ok(ConversationSession::new(user_id, persona_id)),
            Err(err) => Err(err),
        }
    }

    /// Persists the session's messages.
    ///
    /// Inserts on first save and captures the new id; updates afterwards. A
    /// `message_sent` analytics event follows every successful save, and a
    /// failure to record it is logged without failing the save.
    pub async fn save(&self, session: &mut ConversationSession) -> Result<Conversation> {
        let saved = match session.conversation_id.as_deref() {
            Some(id) => {
                self.conversations
                    .update_messages(id, &session.messages)
                    .await?
            }
            None => {
                let stored = self
                    .conversations
                    .insert(NewConversation {
                        user_id: session.user_id.clone(),
                        persona_id: session.persona_id.clone(),
                        title: derive_title(&session.messages),
                        messages: session.messages.clone(),
                    })
                    .await?;
                tracing::info!(
                    user_id = %session.user_id,
                    persona_id = %session.persona_id,
                    conversation_id = %stored.id,
                    "Created conversation"
                );
                session.conversation_id = Some(stored.id.clone());
                stored
            }
        };

        let event = AnalyticsEvent::message_sent(&session.user_id, &session.persona_id);
        if let Err(err) = self.analytics.record(event).await {
            tracing::warn!(
                user_id = %session.user_id,
                error = %err,
                "Failed to record analytics event"
            );
        }

        Ok(saved)
    }

    /// Hard-deletes a conversation owned by `user_id`.
    pub async fn delete(&self, user_id: &str, conversation_id: &str) -> Result<()> {
        let owned = self
            .conversations
            .list_for_user(user_id)
            .await?
            .iter()
            .any(|conversation| conversation.id == conversation_id);
        if !owned {
            return Err(AdvisorError::not_found("Conversation", conversation_id));
        }
        self.conversations.delete(conversation_id).await?;
        tracing::info!(user_id, conversation_id, "Deleted conversation");
        Ok(())
    }

    /// Deletes the session's stored row, if any, and resets the session.
    pub async fn clear(&self, session: &mut ConversationSession) -> Result<()> {
        if let Some(id) = session.conversation_id.as_deref() {
            self.conversations.delete(id).await?;
        }
        session.reset();
        Ok(())
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Conversation>> {
        self.conversations.list_for_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::conversation::DEFAULT_TITLE;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeConversations {
        rows: Mutex<Vec<Conversation>>,
    }

    #[async_trait]
    impl ConversationRepository for FakeConversations {
        async fn find_latest(&self, user_id: &str, persona_id: &str) -> Result<Option<Conversation>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .rev()
                .find(|c| c.user_id == user_id && c.persona_id == persona_id)
                .cloned())
        }

        async fn list_for_user(&self, user_id: &str) -> Result<Vec<Conversation>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().filter(|c| c.user_id == user_id).cloned().collect())
        }

        async fn insert(&self, conversation: NewConversation) -> Result<Conversation> {
            let mut rows = self.rows.lock().unwrap();
            let now = chrono::Utc::now();
            let stored = Conversation {
                id: format!("c-{}", rows.len() + 1),
                user_id: conversation.user_id,
                persona_id: conversation.persona_id,
                title: conversation.title,
                messages: conversation.messages,
                created_at: now,
                updated_at: now,
            };
            rows.push(stored.clone());
            Ok(stored)
        }

        async fn update_messages(&self, id: &str, messages: &[ChatMessage]) -> Result<Conversation> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| AdvisorError::not_found("Conversation", id))?;
            row.messages = messages.to_vec();
            Ok(row.clone())
        }

        async fn delete(&self, id: &str) -> Result<()> {
            self.rows.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        }
    }

    struct FailingAnalytics;

    #[async_trait]
    impl AnalyticsRepository for FailingAnalytics {
        async fn record(&self, _event: AnalyticsEvent) -> Result<()> {
            Err(AdvisorError::data_access("analytics table unavailable"))
        }
    }

    fn service(repo: Arc<FakeConversations>) -> ConversationService {
        ConversationService::new(repo, Arc::new(FailingAnalytics))
    }

    #[tokio::test]
    async fn test_open_without_history_starts_empty() {
        let service = service(Arc::new(FakeConversations::default()));
        let session = service.open("user-1", "therapist").await.unwrap();
        assert!(session.conversation_id().is_none());
        assert!(session.messages().is_empty());

        let err = service.load_latest("user-1", "therapist").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_insert_then_update_reuses_id() {
        let repo = Arc::new(FakeConversations::default());
        let service = service(repo.clone());
        let mut session = ConversationSession::new("user-1", "career");

        session.push(ChatMessage::user("How do I negotiate a raise?"));
        let first = service.save(&mut session).await.unwrap();
        assert_eq!(first.title, "How do I negotiate a raise?");
        assert_eq!(session.conversation_id(), Some(first.id.as_str()));

        session.push(ChatMessage::assistant("Start with market data."));
        let second = service.save(&mut session).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(repo.rows.lock().unwrap().len(), 1);
        assert_eq!(second.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_save_without_user_message_uses_default_title() {
        let service = service(Arc::new(FakeConversations::default()));
        let mut session = ConversationSession::new("user-1", "creative");
        session.push(ChatMessage::assistant("Hi there"));
        let saved = service.save(&mut session).await.unwrap();
        assert_eq!(saved.title, DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn test_delete_requires_ownership() {
        let repo = Arc::new(FakeConversations::default());
        let service = service(repo.clone());
        let mut session = ConversationSession::new("user-1", "finance");
        session.push(ChatMessage::user("Budget help"));
        let saved = service.save(&mut session).await.unwrap();

        let err = service.delete("user-2", &saved.id).await.unwrap_err();
        assert!(err.is_not_found());

        service.delete("user-1", &saved.id).await.unwrap();
        assert!(repo.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_resets_session() {
        let repo = Arc::new(FakeConversations::default());
        let service = service(repo.clone());
        let mut session = ConversationSession::new("user-1", "wellness");
        session.push(ChatMessage::user("Sleep tips"));
        service.save(&mut session).await.unwrap();

        service.clear(&mut session).await.unwrap();
        assert!(session.conversation_id().is_none());
        assert!(repo.rows.lock().unwrap().is_empty());

        session.push(ChatMessage::user("Fresh start"));
        let saved = service.save(&mut session).await.unwrap();
        assert_eq!(saved.title, "Fresh start");
    }
}
