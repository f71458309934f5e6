//! Billing customer mapping backed by the `subscriptions` table.

use crate::dto::{SubscriptionRowDTO, decode_first};
use crate::supabase_client::SupabaseClient;
use advisor_core::billing::{BillingRecord, BillingRepository};
use advisor_core::{AdvisorError, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

const TABLE: &str = "subscriptions";

pub struct SupabaseBillingRepository {
    client: SupabaseClient,
}

impl SupabaseBillingRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<BillingRecord>> {
        let rows = self
            .client
            .from(TABLE)
            .select("*")
            .eq(column, value)
            .limit(1)
            .fetch()
            .await?;
        decode_first::<SubscriptionRowDTO, _>(TABLE, rows)
    }
}

#[async_trait]
impl BillingRepository for SupabaseBillingRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<BillingRecord>> {
        self.find_one("user_id", user_id).await
    }

    async fn find_by_customer(&self, customer_id: &str) -> Result<Option<BillingRecord>> {
        self.find_one("billing_customer_id", customer_id).await
    }

    /// Inserts the mapping unless the user already has one.
    ///
    /// When two checkouts race, the loser's insert is dropped by the unique
    /// constraint on `user_id` and the winner's row is returned instead.
    async fn create(&self, user_id: &str, customer_id: &str) -> Result<BillingRecord> {
        let rows = self
            .client
            .from(TABLE)
            .ignore_duplicates_on("user_id")
            .insert(&json!({
                "user_id": user_id,
                "billing_customer_id": customer_id,
            }))
            .await?;
        if let Some(record) = decode_first::<SubscriptionRowDTO, _>(TABLE, rows)? {
            return Ok(record);
        }
        self.find_by_user(user_id).await?.ok_or_else(|| {
            AdvisorError::data_access(format!("billing record for user '{user_id}' was not stored"))
        })
    }

    async fn record_subscription(
        &self,
        customer_id: &str,
        plan_id: Option<&str>,
        status: Option<&str>,
    ) -> Result<()> {
        self.client
            .from(TABLE)
            .eq("billing_customer_id", customer_id)
            .update(&json!({
                "plan_id": plan_id,
                "status": status,
                "updated_at": Utc::now(),
            }))
            .await
            .map(|_| ())
    }
}
