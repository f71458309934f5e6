//! Daily quota decision.

use crate::plan::Plan;
use serde::{Deserialize, Serialize};

/// `remaining` value reported for unlimited plans.
pub const UNLIMITED_REMAINING: i64 = -1;

/// Result of checking whether a user may send another message today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    pub allowed: bool,
    /// Messages left today, or [`UNLIMITED_REMAINING`] for unlimited plans
    pub remaining: i64,
    /// Daily limit, `None` when unlimited
    pub limit: Option<u32>,
    /// Upgrade prompt shown when the limit is reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Decides whether another message is allowed given today's usage.
///
/// Reaching exactly the limit denies: with a limit of 10, the 11th message is
/// blocked once 10 are recorded.
pub fn check_quota(plan: &Plan, used_today: u32) -> QuotaStatus {
    let Some(limit) = plan.daily_limit else {
        return QuotaStatus {
            allowed: true,
            remaining: UNLIMITED_REMAINING,
            limit: None,
            message: None,
        };
    };

    let remaining = i64::from(limit) - i64::from(used_today);
    if remaining <= 0 {
        return QuotaStatus {
            allowed: false,
            remaining: 0,
            limit: Some(limit),
            message: Some(format!(
                "You've reached your daily limit of {limit} conversations. Upgrade to Pro for unlimited access!"
            )),
        };
    }

    QuotaStatus {
        allowed: true,
        remaining,
        limit: Some(limit),
        message: None,
    }
}
