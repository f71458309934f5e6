//! Profile row DTO.

use super::require_non_blank;
use advisor_core::AdvisorError;
use advisor_core::plan::Tier;
use advisor_core::user::UserProfile;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::str::FromStr;

/// A row of the `profiles` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRowDTO {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub subscription_tier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRowDTO> for UserProfile {
    type Error = AdvisorError;

    fn try_from(row: ProfileRowDTO) -> Result<Self, Self::Error> {
        require_non_blank("profiles", "id", &row.id)?;
        Ok(UserProfile {
            subscription_tier: parse_tier(&row.id, row.subscription_tier.as_deref()),
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// Unknown tier strings degrade to free rather than granting entitlements.
fn parse_tier(user_id: &str, raw: Option<&str>) -> Tier {
    match raw {
        None => Tier::Free,
        Some(value) => Tier::from_str(value).unwrap_or_else(|_| {
            tracing::warn!(user_id, tier = value, "Unknown subscription tier, treating as free");
            Tier::Free
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(tier: serde_json::Value) -> UserProfile {
        let row: ProfileRowDTO = serde_json::from_value(json!({
            "id": "user-1",
            "email": "ada@example.com",
            "subscription_tier": tier,
            "created_at": "2026-05-01T10:00:00Z",
            "updated_at": "2026-05-01T10:00:00Z"
        }))
        .unwrap();
        UserProfile::try_from(row).unwrap()
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!(profile(json!("pro")).subscription_tier, Tier::Pro);
        assert_eq!(profile(json!(null)).subscription_tier, Tier::Free);
        assert_eq!(profile(json!("platinum")).subscription_tier, Tier::Free);
    }
}
