//! Goal domain module.
//!
//! Goals are user-created targets tracked with a 0–100 progress value,
//! optionally tied to a persona.

mod model;
mod repository;

pub use model::{Goal, GoalStatus, GoalUpdate, MAX_PROGRESS, NewGoal};
pub use repository::GoalRepository;
