//! User domain module.
//!
//! Identity lives with the hosted identity provider; this module models the
//! profile row the service reads, including the subscription tier.
//!
//! # Module Structure
//!
//! - `model`: User profile domain model
//! - `repository`: Profile lookup and tier assignment

mod model;
mod repository;

// Re-export public API
pub use model::UserProfile;
pub use repository::UserRepository;
