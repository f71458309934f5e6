//! Daily message quota enforcement.

use advisor_core::Result;
use advisor_core::plan::{Tier, plan_for};
use advisor_core::usage::{DayBoundary, QuotaStatus, UsageRepository, check_quota};
use advisor_core::user::UserRepository;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Today's usage for one user, as reported by the usage endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub tier: Tier,
    pub used: u32,
    pub quota: QuotaStatus,
}

/// Checks and records per-day message usage against the user's plan.
///
/// The calendar day is taken from [`DayBoundary`], so quota resets happen at
/// the same instant for the check and the increment.
pub struct UsageMeter {
    users: Arc<dyn UserRepository>,
    usage: Arc<dyn UsageRepository>,
    day_boundary: DayBoundary,
}

impl UsageMeter {
    pub fn new(
        users: Arc<dyn UserRepository>,
        usage: Arc<dyn UsageRepository>,
        day_boundary: DayBoundary,
    ) -> Self {
        Self {
            users,
            usage,
            day_boundary,
        }
    }

    pub fn day_boundary(&self) -> DayBoundary {
        self.day_boundary
    }

    /// Decides whether the user may send another message today.
    pub async fn check_quota(&self, user_id: &str) -> Result<QuotaStatus> {
        Ok(self.snapshot_at(user_id, Utc::now()).await?.quota)
    }

    pub async fn snapshot(&self, user_id: &str) -> Result<UsageSnapshot> {
        self.snapshot_at(user_id, Utc::now()).await
    }

    pub async fn snapshot_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<UsageSnapshot> {
        let tier = self.tier_of(user_id).await?;
        let used = self
            .usage
            .count_for_day(user_id, self.day_boundary.date_of(now))
            .await?;
        Ok(UsageSnapshot {
            tier,
            used,
            quota: check_quota(plan_for(tier), used),
        })
    }

    /// Counts one sent message for today. Returns the new daily total.
    pub async fn increment_usage(&self, user_id: &str) -> Result<u32> {
        let day = self.day_boundary.today();
        let count = self.usage.increment(user_id, day).await?;
        tracing::debug!(user_id, %day, count, "Recorded message usage");
        Ok(count)
    }

    // Users without a profile row are metered as free.
    async fn tier_of(&self, user_id: &str) -> Result<Tier> {
        match self.users.find_by_id(user_id).await? {
            Some(profile) => Ok(profile.subscription_tier),
            None => {
                tracing::debug!(user_id, "No profile found, metering as free tier");
                Ok(Tier::Free)
            }
        }
    }
}
