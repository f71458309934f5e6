//! Goal domain model.

use crate::error::{AdvisorError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Upper bound of goal progress.
pub const MAX_PROGRESS: u8 = 100;

/// Lifecycle of a goal. The only transition is `Active` to `Completed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
}

/// A stored goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub persona_id: Option<String>,
    pub status: GoalStatus,
    pub progress: u8,
    pub target_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    pub fn is_completed(&self) -> bool {
        self.status == GoalStatus::Completed
    }

    /// Validates a progress change for this goal.
    pub fn progress_update(&self, progress: u8) -> Result<GoalUpdate> {
        if self.is_completed() {
            return Err(AdvisorError::validation(format!(
                "goal '{}' is completed and its progress can no longer change",
                self.id
            )));
        }
        validate_progress(progress)?;
        Ok(GoalUpdate {
            progress: Some(progress),
            status: None,
        })
    }

    /// The update that completes this goal.
    pub fn completion_update() -> GoalUpdate {
        GoalUpdate {
            progress: Some(MAX_PROGRESS),
            status: Some(GoalStatus::Completed),
        }
    }
}

/// Payload for creating a goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub persona_id: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

impl NewGoal {
    /// Rejects blank titles and unknown persona ids.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(AdvisorError::validation("Missing userId"));
        }
        if self.title.trim().is_empty() {
            return Err(AdvisorError::validation("Missing title"));
        }
        if let Some(persona_id) = &self.persona_id
            && crate::persona::find_persona(persona_id).is_none()
        {
            return Err(AdvisorError::validation(format!(
                "Unknown personaId '{persona_id}'"
            )));
        }
        Ok(())
    }
}

/// Partial update applied to a goal row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalUpdate {
    pub progress: Option<u8>,
    pub status: Option<GoalStatus>,
}

fn validate_progress(progress: u8) -> Result<()> {
    if progress > MAX_PROGRESS {
        return Err(AdvisorError::validation(format!(
            "progress must be between 0 and {MAX_PROGRESS}, got {progress}"
        )));
    }
    Ok(())
}
