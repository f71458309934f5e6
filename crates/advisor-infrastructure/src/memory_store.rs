//! In-process store implementing every repository trait.
//!
//! Used by tests and by local runs without a hosted database. Behaves like
//! the hosted tables: ids and timestamps are assigned on insert, the
//! customer mapping is unique per user, and counter increments are atomic.

use advisor_core::analytics::{AnalyticsEvent, AnalyticsRepository};
use advisor_core::billing::{BillingRecord, BillingRepository};
use advisor_core::conversation::{
    ChatMessage, Conversation, ConversationRepository, NewConversation,
};
use advisor_core::goal::{Goal, GoalRepository, GoalStatus, GoalUpdate, NewGoal};
use advisor_core::plan::Tier;
use advisor_core::usage::UsageRepository;
use advisor_core::user::{UserProfile, UserRepository};
use advisor_core::{AdvisorError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    profiles: HashMap<String, UserProfile>,
    conversations: Vec<Conversation>,
    goals: Vec<Goal>,
    subscriptions: Vec<BillingRecord>,
    daily_usage: HashMap<(String, NaiveDate), u32>,
    events: Vec<AnalyticsEvent>,
    last_write: Option<DateTime<Utc>>,
}

impl Tables {
    // Strictly increasing so "latest" stays well defined for rapid writes.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_write {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_write = Some(next);
        next
    }
}

/// Shared in-memory tables.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds or replaces a profile row.
    pub async fn put_profile(&self, profile: UserProfile) {
        self.tables
            .write()
            .await
            .profiles
            .insert(profile.id.clone(), profile);
    }

    /// Creates a free-tier profile with the given email.
    pub async fn add_user(&self, user_id: &str, email: Option<&str>) -> UserProfile {
        let now = Utc::now();
        let profile = UserProfile {
            id: user_id.to_string(),
            email: email.map(str::to_string),
            full_name: None,
            subscription_tier: Tier::Free,
            created_at: now,
            updated_at: now,
        };
        self.put_profile(profile.clone()).await;
        profile
    }

    /// Inserts a conversation row verbatim, keeping its timestamps.
    pub async fn put_conversation(&self, conversation: Conversation) {
        self.tables.write().await.conversations.push(conversation);
    }

    pub async fn conversations(&self) -> Vec<Conversation> {
        self.tables.read().await.conversations.clone()
    }

    pub async fn events(&self) -> Vec<AnalyticsEvent> {
        self.tables.read().await.events.clone()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.tables.read().await.profiles.get(user_id).cloned())
    }

    async fn set_tier(&self, user_id: &str, tier: Tier) -> Result<()> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        let profile = tables
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| AdvisorError::not_found("UserProfile", user_id))?;
        profile.subscription_tier = tier;
        profile.updated_at = now;
        Ok(())
    }
}

#[async_trait]
impl ConversationRepository for InMemoryStore {
    async fn find_latest(&self, user_id: &str, persona_id: &str) -> Result<Option<Conversation>> {
        let tables = self.tables.read().await;
        Ok(tables
            .conversations
            .iter()
            .filter(|c| c.user_id == user_id && c.persona_id == persona_id)
            .max_by_key(|c| c.updated_at)
            .cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Conversation>> {
        let tables = self.tables.read().await;
        let mut conversations: Vec<Conversation> = tables
            .conversations
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(conversations)
    }

    async fn insert(&self, conversation: NewConversation) -> Result<Conversation> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        let stored = Conversation {
            id: Uuid::new_v4().to_string(),
            user_id: conversation.user_id,
            persona_id: conversation.persona_id,
            title: conversation.title,
            messages: conversation.messages,
            created_at: now,
            updated_at: now,
        };
        tables.conversations.push(stored.clone());
        Ok(stored)
    }

    async fn update_messages(
        &self,
        conversation_id: &str,
        messages: &[ChatMessage],
    ) -> Result<Conversation> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        let conversation = tables
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or_else(|| AdvisorError::not_found("Conversation", conversation_id))?;
        conversation.messages = messages.to_vec();
        conversation.updated_at = now;
        Ok(conversation.clone())
    }

    async fn delete(&self, conversation_id: &str) -> Result<()> {
        self.tables
            .write()
            .await
            .conversations
            .retain(|c| c.id != conversation_id);
        Ok(())
    }
}

#[async_trait]
impl GoalRepository for InMemoryStore {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Goal>> {
        let tables = self.tables.read().await;
        let mut goals: Vec<Goal> = tables
            .goals
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect();
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(goals)
    }

    async fn find_by_id(&self, goal_id: &str) -> Result<Option<Goal>> {
        let tables = self.tables.read().await;
        Ok(tables.goals.iter().find(|g| g.id == goal_id).cloned())
    }

    async fn insert(&self, goal: NewGoal) -> Result<Goal> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        let stored = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: goal.user_id,
            title: goal.title.trim().to_string(),
            description: goal.description,
            persona_id: goal.persona_id,
            status: GoalStatus::Active,
            progress: 0,
            target_date: goal.target_date,
            created_at: now,
            updated_at: now,
        };
        tables.goals.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        let goal = tables
            .goals
            .iter_mut()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| AdvisorError::not_found("Goal", goal_id))?;
        if let Some(progress) = update.progress {
            goal.progress = progress;
        }
        if let Some(status) = update.status {
            goal.status = status;
        }
        goal.updated_at = now;
        Ok(goal.clone())
    }

    async fn delete(&self, goal_id: &str) -> Result<()> {
        self.tables.write().await.goals.retain(|g| g.id != goal_id);
        Ok(())
    }
}

#[async_trait]
impl BillingRepository for InMemoryStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<BillingRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .subscriptions
            .iter()
            .find(|r| r.user_id == user_id)
            .cloned())
    }

    async fn find_by_customer(&self, customer_id: &str) -> Result<Option<BillingRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .subscriptions
            .iter()
            .find(|r| r.billing_customer_id == customer_id)
            .cloned())
    }

    async fn create(&self, user_id: &str, customer_id: &str) -> Result<BillingRecord> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.subscriptions.iter().find(|r| r.user_id == user_id) {
            return Ok(existing.clone());
        }
        let now = tables.tick();
        let record = BillingRecord {
            user_id: user_id.to_string(),
            billing_customer_id: customer_id.to_string(),
            tier_plan_id: None,
            status: None,
            created_at: now,
            updated_at: now,
        };
        tables.subscriptions.push(record.clone());
        Ok(record)
    }

    async fn record_subscription(
        &self,
        customer_id: &str,
        plan_id: Option<&str>,
        status: Option<&str>,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        let now = tables.tick();
        for record in tables
            .subscriptions
            .iter_mut()
            .filter(|r| r.billing_customer_id == customer_id)
        {
            record.tier_plan_id = plan_id.map(str::to_string);
            record.status = status.map(str::to_string);
            record.updated_at = now;
        }
        Ok(())
    }
}

#[async_trait]
impl UsageRepository for InMemoryStore {
    async fn count_for_day(&self, user_id: &str, day: NaiveDate) -> Result<u32> {
        let tables = self.tables.read().await;
        Ok(tables
            .daily_usage
            .get(&(user_id.to_string(), day))
            .copied()
            .unwrap_or(0))
    }

    async fn increment(&self, user_id: &str, day: NaiveDate) -> Result<u32> {
        let mut tables = self.tables.write().await;
        let count = tables
            .daily_usage
            .entry((user_id.to_string(), day))
            .or_insert(0);
        *count += 1;
        Ok(*count)
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryStore {
    async fn record(&self, event: AnalyticsEvent) -> Result<()> {
        self.tables.write().await.events.push(event);
        Ok(())
    }
}
