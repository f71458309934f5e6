//! Domain layer for the expert advisor service.
//!
//! Models, pure business rules (quota decisions, analytics aggregation, title
//! derivation, price mapping) and the repository/provider traits the outer
//! layers implement.

pub mod analytics;
pub mod billing;
pub mod completion;
pub mod conversation;
pub mod error;
pub mod goal;
pub mod persona;
pub mod plan;
pub mod usage;
pub mod user;

// Re-export common error type
pub use error::{AdvisorError, Result};
