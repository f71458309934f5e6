//! Goal tracking.

use advisor_core::goal::{Goal, GoalRepository, NewGoal};
use advisor_core::{AdvisorError, Result};
use std::sync::Arc;

/// Creates and advances a user's goals.
///
/// Every operation on an existing goal checks that it belongs to the caller;
/// goals of other users are reported as not found.
pub struct GoalService {
    goals: Arc<dyn GoalRepository>,
}

impl GoalService {
    pub fn new(goals: Arc<dyn GoalRepository>) -> Self {
        Self { goals }
    }

    /// Goals for a user, newest first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.goals.list_for_user(user_id).await
    }

    pub async fn create(&self, goal: NewGoal) -> Result<Goal> {
        goal.validate()?;
        let stored = self.goals.insert(goal).await?;
        tracing::info!(user_id = %stored.user_id, goal_id = %stored.id, "Created goal");
        Ok(stored)
    }

    /// Sets progress (0 to 100) on an active goal.
    pub async fn update_progress(&self, user_id: &str, goal_id: &str, progress: u8) -> Result<Goal> {
        let goal = self.owned(user_id, goal_id).await?;
        let update = goal.progress_update(progress)?;
        self.goals.update(goal_id, update).await
    }

    /// Marks a goal completed. Completing an already completed goal is a no-op.
    pub async fn complete(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        let goal = self.owned(user_id, goal_id).await?;
        if goal.is_completed() {
            return Ok(goal);
        }
        self.goals.update(goal_id, Goal::completion_update()).await
    }

    pub async fn delete(&self, user_id: &str, goal_id: &str) -> Result<()> {
        self.owned(user_id, goal_id).await?;
        self.goals.delete(goal_id).await
    }

    async fn owned(&self, user_id: &str, goal_id: &str) -> Result<Goal> {
        self.goals
            .find_by_id(goal_id)
            .await?
            .filter(|goal| goal.user_id == user_id)
            .ok_or_else(|| AdvisorError::not_found("Goal", goal_id))
    }
}
