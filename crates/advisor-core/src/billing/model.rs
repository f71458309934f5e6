//! Billing domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mapping between a user and their payment-provider customer.
///
/// Created lazily on first checkout and updated by webhook events keyed on
/// `billing_customer_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRecord {
    pub user_id: String,
    pub billing_customer_id: String,
    pub tier_plan_id: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for opening a hosted subscription checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub customer_id: String,
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// A hosted checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Which subscription lifecycle event was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionChangeKind {
    Created,
    Updated,
    Deleted,
}

/// A verified subscription state change from the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionChange {
    pub event_id: String,
    pub kind: SubscriptionChangeKind,
    pub customer_id: String,
    /// Price of the first subscription item, if any
    pub price_id: Option<String>,
    pub status: Option<String>,
}
