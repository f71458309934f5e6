//! Analytics event records.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Event type recorded after every successful conversation save.
pub const MESSAGE_SENT: &str = "message_sent";

/// A single analytics event row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub user_id: String,
    pub event_type: String,
    pub event_data: Value,
}

impl AnalyticsEvent {
    /// Builds the `message_sent` event for a persona.
    pub fn message_sent(user_id: impl Into<String>, persona_id: &str) -> Self {
        Self {
            user_id: user_id.into(),
            event_type: MESSAGE_SENT.to_string(),
            event_data: json!({ "persona_id": persona_id }),
        }
    }
}
