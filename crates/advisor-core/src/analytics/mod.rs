//! Usage analytics domain module.
//!
//! Analytics are derived at read time from stored conversations; only the
//! raw `message_sent` events are persisted.
//!
//! # Module Structure
//!
//! - `event`: Analytics event records
//! - `repository`: Event sink trait
//! - `summary`: Stateless aggregation over a user's conversations

mod event;
mod repository;
mod summary;

pub use event::{AnalyticsEvent, MESSAGE_SENT};
pub use repository::AnalyticsRepository;
pub use summary::{
    NEW_ACTIVITY_GROWTH_PERCENT, PersonaUsage, UsageAnalytics, growth_percent, summarize,
};
