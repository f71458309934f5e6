//! Subscription tier and plan models.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Subscription level stored on the user record.
///
/// String forms are lowercase (`free`, `pro`, `enterprise`) both on the wire
/// and in stored rows.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Pro,
    Enterprise,
}

/// Entitlements attached to a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub tier: Tier,
    pub name: &'static str,
    pub monthly_price: &'static str,
    pub yearly_price: &'static str,
    /// Messages allowed per calendar day; `None` means unlimited
    pub daily_limit: Option<u32>,
    pub features: &'static [&'static str],
}

impl Plan {
    pub fn is_unlimited(&self) -> bool {
        self.daily_limit.is_none()
    }
}
