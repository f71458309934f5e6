//! UserProfile domain model.

use crate::plan::Tier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's profile row.
///
/// `subscription_tier` is written only by webhook reconciliation; values
/// supplied by clients are never trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub subscription_tier: Tier,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Email usable for billing, if present and non-blank.
    pub fn billing_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.trim().is_empty())
    }
}
