//! Daily usage counters backed by the hosted database.

use crate::supabase_client::SupabaseClient;
use advisor_core::usage::UsageRepository;
use advisor_core::{AdvisorError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

const TABLE: &str = "daily_usage";

/// Database function that upserts the counter and returns the new value.
const INCREMENT_FUNCTION: &str = "increment_daily_usage";

#[derive(Debug, Deserialize)]
struct DailyUsageRow {
    message_count: i64,
}

/// Per-user per-day message counters.
///
/// Increments go through a single database function so concurrent sends
/// cannot lose updates.
pub struct SupabaseUsageRepository {
    client: SupabaseClient,
}

impl SupabaseUsageRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UsageRepository for SupabaseUsageRepository {
    async fn count_for_day(&self, user_id: &str, day: NaiveDate) -> Result<u32> {
        let rows = self
            .client
            .from(TABLE)
            .select("message_count")
            .eq("user_id", user_id)
            .eq("day", day)
            .limit(1)
            .fetch()
            .await?;
        match rows.into_iter().next() {
            None => Ok(0),
            Some(row) => {
                let row: DailyUsageRow = serde_json::from_value(row).map_err(|err| {
                    AdvisorError::serialization("JSON", format!("malformed '{TABLE}' row: {err}"))
                })?;
                to_count(row.message_count)
            }
        }
    }

    async fn increment(&self, user_id: &str, day: NaiveDate) -> Result<u32> {
        let count: i64 = self
            .client
            .rpc(
                INCREMENT_FUNCTION,
                &json!({ "p_user_id": user_id, "p_day": day }),
            )
            .await?;
        to_count(count)
    }
}

fn to_count(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        AdvisorError::serialization("JSON", format!("usage counter out of range: {value}"))
    })
}
