//! Usage analytics for the dashboard.

use advisor_core::Result;
use advisor_core::analytics::{UsageAnalytics, summarize};
use advisor_core::conversation::ConversationRepository;
use advisor_core::usage::DayBoundary;
use chrono::Utc;
use std::sync::Arc;

pub struct AnalyticsService {
    conversations: Arc<dyn ConversationRepository>,
    day_boundary: DayBoundary,
}

impl AnalyticsService {
    pub fn new(conversations: Arc<dyn ConversationRepository>, day_boundary: DayBoundary) -> Self {
        Self {
            conversations,
            day_boundary,
        }
    }

    /// Derives the user's analytics from their stored conversations.
    pub async fn summarize_for_user(&self, user_id: &str) -> Result<UsageAnalytics> {
        let conversations = self.conversations.list_for_user(user_id).await?;
        Ok(summarize(&conversations, Utc::now(), self.day_boundary))
    }
}
