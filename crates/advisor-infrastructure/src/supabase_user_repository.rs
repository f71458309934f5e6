//! Profile repository backed by the hosted database.

use crate::dto::{ProfileRowDTO, decode_first};
use crate::supabase_client::SupabaseClient;
use advisor_core::plan::Tier;
use advisor_core::user::{UserProfile, UserRepository};
use advisor_core::{AdvisorError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

const TABLE: &str = "profiles";

pub struct SupabaseUserRepository {
    client: SupabaseClient,
}

impl SupabaseUserRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepository for SupabaseUserRepository {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let rows = self
            .client
            .from(TABLE)
            .select("*")
            .eq("id", user_id)
            .limit(1)
            .fetch()
            .await?;
        decode_first::<ProfileRowDTO, _>(TABLE, rows)
    }

    async fn set_tier(&self, user_id: &str, tier: Tier) -> Result<()> {
        let rows = self
            .client
            .from(TABLE)
            .eq("id", user_id)
            .update(&json!({
                "subscription_tier": tier.to_string(),
                "updated_at": Utc::now(),
            }))
            .await?;
        if rows.is_empty() {
            return Err(AdvisorError::not_found("UserProfile", user_id));
        }
        Ok(())
    }
}
