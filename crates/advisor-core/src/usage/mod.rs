//! Usage metering domain module.
//!
//! # Module Structure
//!
//! - `quota`: Pure quota decision for a tier and today's usage count
//! - `day`: Calendar-day boundary used to bucket usage
//! - `repository`: Per-user, per-day counter persistence

mod day;
mod quota;
mod repository;

pub use day::DayBoundary;
pub use quota::{QuotaStatus, UNLIMITED_REMAINING, check_quota};
pub use repository::UsageRepository;
