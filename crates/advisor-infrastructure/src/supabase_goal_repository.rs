//! Goal repository backed by the hosted database.

use crate::dto::{GoalInsertDTO, GoalRowDTO, GoalUpdateDTO, decode_first, decode_rows};
use crate::supabase_client::SupabaseClient;
use advisor_core::goal::{Goal, GoalRepository, GoalUpdate, NewGoal};
use advisor_core::{AdvisorError, Result};
use async_trait::async_trait;
use chrono::Utc;

const TABLE: &str = "goals";

pub struct SupabaseGoalRepository {
    client: SupabaseClient,
}

impl SupabaseGoalRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GoalRepository for SupabaseGoalRepository {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Goal>> {
        let rows = self
            .client
            .from(TABLE)
            .select("*")
            .eq("user_id", user_id)
            .order_desc("created_at")
            .fetch()
            .await?;
        Ok(decode_rows::<GoalRowDTO, _>(TABLE, rows))
    }

    async fn find_by_id(&self, goal_id: &str) -> Result<Option<Goal>> {
        let rows = self
            .client
            .from(TABLE)
            .select("*")
            .eq("id", goal_id)
            .limit(1)
            .fetch()
            .await?;
        decode_first::<GoalRowDTO, _>(TABLE, rows)
    }

    async fn insert(&self, goal: NewGoal) -> Result<Goal> {
        let rows = self
            .client
            .from(TABLE)
            .insert(&GoalInsertDTO::from(&goal))
            .await?;
        decode_first::<GoalRowDTO, _>(TABLE, rows)?
            .ok_or_else(|| AdvisorError::data_access("goal insert returned no row"))
    }

    async fn update(&self, goal_id: &str, update: GoalUpdate) -> Result<Goal> {
        let rows = self
            .client
            .from(TABLE)
            .eq("id", goal_id)
            .update(&GoalUpdateDTO::new(&update, Utc::now()))
            .await?;
        decode_first::<GoalRowDTO, _>(TABLE, rows)?
            .ok_or_else(|| AdvisorError::not_found("Goal", goal_id))
    }

    async fn delete(&self, goal_id: &str) -> Result<()> {
        self.client.from(TABLE).eq("id", goal_id).delete().await
    }
}
