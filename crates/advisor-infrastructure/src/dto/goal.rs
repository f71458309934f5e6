//! Goal row DTOs.

use super::require_non_blank;
use advisor_core::AdvisorError;
use advisor_core::goal::{Goal, GoalStatus, GoalUpdate, MAX_PROGRESS, NewGoal};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const TABLE: &str = "goals";

/// A row of the `goals` table.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalRowDTO {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub persona_id: Option<String>,
    pub status: String,
    pub progress: i32,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<GoalRowDTO> for Goal {
    type Error = AdvisorError;

    fn try_from(row: GoalRowDTO) -> Result<Self, Self::Error> {
        require_non_blank(TABLE, "id", &row.id)?;
        require_non_blank(TABLE, "user_id", &row.user_id)?;

        let status = GoalStatus::from_str(&row.status).map_err(|_| {
            AdvisorError::serialization(
                "JSON",
                format!("goal '{}' has unknown status '{}'", row.id, row.status),
            )
        })?;
        let progress = u8::try_from(row.progress)
            .ok()
            .filter(|progress| *progress <= MAX_PROGRESS)
            .ok_or_else(|| {
                AdvisorError::serialization(
                    "JSON",
                    format!("goal '{}' has out-of-range progress {}", row.id, row.progress),
                )
            })?;

        Ok(Goal {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            persona_id: row.persona_id,
            status,
            progress,
            target_date: row.target_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert payload for a new goal.
#[derive(Debug, Clone, Serialize)]
pub struct GoalInsertDTO<'a> {
    pub user_id: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub persona_id: Option<&'a str>,
    pub status: String,
    pub progress: u8,
    pub target_date: Option<NaiveDate>,
}

impl<'a> From<&'a NewGoal> for GoalInsertDTO<'a> {
    fn from(goal: &'a NewGoal) -> Self {
        Self {
            user_id: &goal.user_id,
            title: goal.title.trim(),
            description: goal.description.as_deref(),
            persona_id: goal.persona_id.as_deref(),
            status: GoalStatus::Active.to_string(),
            progress: 0,
            target_date: goal.target_date,
        }
    }
}

/// PATCH payload; absent fields are left untouched.
#[derive(Debug, Clone, Serialize)]
pub struct GoalUpdateDTO {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl GoalUpdateDTO {
    pub fn new(update: &GoalUpdate, now: DateTime<Utc>) -> Self {
        Self {
            progress: update.progress,
            status: update.status.map(|status| status.to_string()),
            updated_at: now,
        }
    }
}
