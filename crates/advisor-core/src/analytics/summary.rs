//! Read-time analytics aggregation.
//!
//! Everything here is a pure function of the user's conversations and the
//! current instant; nothing is stored.

use crate::conversation::Conversation;
use crate::persona::DEFAULT_PERSONA_ID;
use crate::usage::DayBoundary;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Growth reported when last week had no messages.
///
/// This is a "new activity" marker rather than a measured growth rate, so the
/// value jumps discontinuously as last week's count goes from 1 to 0.
pub const NEW_ACTIVITY_GROWTH_PERCENT: i64 = 100;

/// Conversation count for one persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaUsage {
    pub persona_id: String,
    pub conversations: u32,
}

/// Aggregated usage figures for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageAnalytics {
    pub total_conversations: usize,
    pub total_messages: usize,
    /// Conversation rows per persona, in first-encountered order
    pub per_persona_usage: Vec<PersonaUsage>,
    pub favorite_persona: String,
    pub this_week_messages: usize,
    pub last_week_messages: usize,
    pub growth_percent: i64,
    /// Distinct calendar days with activity. Not a consecutive-day streak.
    pub active_days: usize,
}

/// Aggregates a user's conversations as of `now`.
pub fn summarize(
    conversations: &[Conversation],
    now: DateTime<Utc>,
    day_boundary: DayBoundary,
) -> UsageAnalytics {
    let total_messages = conversations.iter().map(Conversation::message_count).sum();

    let mut per_persona_usage: Vec<PersonaUsage> = Vec::new();
    for conversation in conversations {
        match per_persona_usage
            .iter_mut()
            .find(|usage| usage.persona_id == conversation.persona_id)
        {
            Some(usage) => usage.conversations += 1,
            None => per_persona_usage.push(PersonaUsage {
                persona_id: conversation.persona_id.clone(),
                conversations: 1,
            }),
        }
    }

    let one_week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);

    let this_week_messages = conversations
        .iter()
        .filter(|c| c.updated_at > one_week_ago)
        .map(Conversation::message_count)
        .sum();
    let last_week_messages = conversations
        .iter()
        .filter(|c| c.updated_at > two_weeks_ago && c.updated_at <= one_week_ago)
        .map(Conversation::message_count)
        .sum();

    let active_days = conversations
        .iter()
        .map(|c| day_boundary.date_of(c.updated_at))
        .collect::<HashSet<_>>()
        .len();

    UsageAnalytics {
        total_conversations: conversations.len(),
        total_messages,
        favorite_persona: favorite_persona(&per_persona_usage),
        per_persona_usage,
        this_week_messages,
        last_week_messages,
        growth_percent: growth_percent(this_week_messages, last_week_messages),
        active_days,
    }
}

/// Week-over-week growth, rounded half up.
///
/// Returns [`NEW_ACTIVITY_GROWTH_PERCENT`] when `last_week` is zero.
pub fn growth_percent(this_week: usize, last_week: usize) -> i64 {
    if last_week == 0 {
        return NEW_ACTIVITY_GROWTH_PERCENT;
    }
    let ratio = (this_week as f64 - last_week as f64) / last_week as f64 * 100.0;
    (ratio + 0.5).floor() as i64
}

// Strict comparison keeps the earliest persona on ties.
fn favorite_persona(usage: &[PersonaUsage]) -> String {
    let mut favorite: Option<&PersonaUsage> = None;
    for entry in usage {
        if favorite.is_none_or(|best| entry.conversations > best.conversations) {
            favorite = Some(entry);
        }
    }
    favorite
        .map(|entry| entry.persona_id.clone())
        .unwrap_or_else(|| DEFAULT_PERSONA_ID.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::ChatMessage;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 20, 12, 0, 0).unwrap()
    }

    fn conversation(persona_id: &str, messages: usize, updated_at: DateTime<Utc>) -> Conversation {
        Conversation {
            id: format!("{persona_id}-{}", updated_at.timestamp()),
            user_id: "user-1".to_string(),
            persona_id: persona_id.to_string(),
            title: "t".to_string(),
            messages: (0..messages).map(|i| ChatMessage::user(format!("m{i}"))).collect(),
            created_at: updated_at,
            updated_at,
        }
    }

    fn repeated(persona_id: &str, count: usize, start: DateTime<Utc>) -> Vec<Conversation> {
        (0..count)
            .map(|i| conversation(persona_id, 2, start - Duration::minutes(i as i64)))
            .collect()
    }

    #[test]
    fn test_empty_history_uses_fallback_persona() {
        let analytics = summarize(&[], now(), DayBoundary::utc());
        assert_eq!(analytics.favorite_persona, DEFAULT_PERSONA_ID);
        assert_eq!(analytics.total_messages, 0);
        assert_eq!(analytics.active_days, 0);
        assert_eq!(analytics.growth_percent, NEW_ACTIVITY_GROWTH_PERCENT);
    }

    #[test]
    fn test_counts_rows_not_messages_per_persona() {
        let conversations = vec![
            conversation("therapist", 10, now()),
            conversation("business", 1, now()),
            conversation("business", 1, now()),
        ];
        let analytics = summarize(&conversations, now(), DayBoundary::utc());
        assert_eq!(analytics.total_messages, 12);
        assert_eq!(analytics.favorite_persona, "business");
        assert_eq!(
            analytics.per_persona_usage,
            vec![
                PersonaUsage {
                    persona_id: "therapist".to_string(),
                    conversations: 1
                },
                PersonaUsage {
                    persona_id: "business".to_string(),
                    conversations: 2
                },
            ]
        );
    }

    #[test]
    fn test_favorite_tie_breaks_by_first_encountered() {
        let mut conversations = repeated("therapist", 3, now());
        conversations.extend(repeated("business", 5, now()));
        conversations.extend(repeated("wellness", 5, now()));
        let analytics = summarize(&conversations, now(), DayBoundary::utc());
        assert_eq!(analytics.favorite_persona, "business");

        let mut reordered = repeated("wellness", 5, now());
        reordered.extend(repeated("therapist", 3, now()));
        reordered.extend(repeated("business", 5, now()));
        let analytics = summarize(&reordered, now(), DayBoundary::utc());
        assert_eq!(analytics.favorite_persona, "wellness");
    }

    #[test]
    fn test_weekly_partitions_are_half_open() {
        let conversations = vec![
            conversation("therapist", 4, now() - Duration::days(1)),
            conversation("therapist", 3, now() - Duration::days(7)),
            conversation("therapist", 2, now() - Duration::days(10)),
            conversation("therapist", 9, now() - Duration::days(14)),
        ];
        let analytics = summarize(&conversations, now(), DayBoundary::utc());
        assert_eq!(analytics.this_week_messages, 4);
        // exactly 7 days ago falls in last week, exactly 14 days ago in neither
        assert_eq!(analytics.last_week_messages, 5);
        assert_eq!(analytics.growth_percent, -20);
    }

    #[test]
    fn test_growth_sentinel_when_last_week_empty() {
        assert_eq!(growth_percent(10, 0), 100);
        assert_eq!(growth_percent(0, 0), 100);
    }

    #[test]
    fn test_growth_rounds_half_up() {
        assert_eq!(growth_percent(3, 2), 50);
        assert_eq!(growth_percent(1, 3), -67);
        assert_eq!(growth_percent(7, 8), -12); // -12.5 rounds toward +inf
        assert_eq!(growth_percent(20, 10), 100);
    }

    #[test]
    fn test_active_days_counts_distinct_dates() {
        let conversations = vec![
            conversation("therapist", 1, now()),
            conversation("business", 1, now() - Duration::hours(2)),
            conversation("wellness", 1, now() - Duration::days(3)),
            conversation("creative", 1, now() - Duration::days(30)),
        ];
        let analytics = summarize(&conversations, now(), DayBoundary::utc());
        assert_eq!(analytics.active_days, 3);
    }
}
