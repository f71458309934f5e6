//! Plan and entitlement domain module.
//!
//! Maps each subscription tier to its daily usage quota and feature list.

mod catalog;
mod model;

pub use catalog::{FREE_DAILY_LIMIT, all_plans, plan_for};
pub use model::{Plan, Tier};
