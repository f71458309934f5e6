//! Usage counter repository trait.

use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Persistence for per-user daily message counters.
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// Returns the number of messages recorded for `user_id` on `day`.
    async fn count_for_day(&self, user_id: &str, day: NaiveDate) -> Result<u32>;

    /// Atomically increments the counter for `user_id` on `day`.
    ///
    /// Implementations must not read-then-write; concurrent sends from several
    /// sessions of the same user must each be counted.
    ///
    /// # Returns
    ///
    /// The counter value after the increment.
    async fn increment(&self, user_id: &str, day: NaiveDate) -> Result<u32>;
}
