//! User profile repository trait.

use super::model::UserProfile;
use crate::error::Result;
use crate::plan::Tier;
use async_trait::async_trait;

/// Access to user profile rows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a profile by user id.
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Assigns the subscription tier. Writing the same tier again is a no-op
    /// in effect.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the profile does not exist.
    async fn set_tier(&self, user_id: &str, tier: Tier) -> Result<()>;
}
