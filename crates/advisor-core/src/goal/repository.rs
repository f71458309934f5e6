//! Goal repository trait.

use super::model::{Goal, GoalUpdate, NewGoal};
use crate::error::Result;
use async_trait::async_trait;

/// Persistence for user goals.
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Lists a user's goals, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Goal>>;

    /// Finds a goal by id.
    async fn find_by_id(&self, goal_id: &str) -> Result<Option<Goal>>;

    /// Inserts a goal and returns the stored row.
    async fn insert(&self, goal: NewGoal) -> Result<Goal>;

    /// Applies a partial update and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no row matches `goal_id`.
    async fn update(&self, goal_id: &str, update: GoalUpdate) -> Result<Goal>;

    /// Deletes a goal. Deleting a missing row is not an error.
    async fn delete(&self, goal_id: &str) -> Result<()>;
}
