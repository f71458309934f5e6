//! Subscription row DTO.

use super::require_non_blank;
use advisor_core::AdvisorError;
use advisor_core::billing::BillingRecord;
use chrono::{DateTime, Utc};
use serde::Deserialize;

const TABLE: &str = "subscriptions";

/// A row of the `subscriptions` table.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionRowDTO {
    pub user_id: String,
    pub billing_customer_id: String,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRowDTO> for BillingRecord {
    type Error = AdvisorError;

    fn try_from(row: SubscriptionRowDTO) -> Result<Self, Self::Error> {
        require_non_blank(TABLE, "user_id", &row.user_id)?;
        require_non_blank(TABLE, "billing_customer_id", &row.billing_customer_id)?;
        Ok(BillingRecord {
            user_id: row.user_id,
            billing_customer_id: row.billing_customer_id,
            tier_plan_id: row.plan_id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
