//! Persona domain module.
//!
//! Personas are the expert advisors users chat with. The catalog is fixed and
//! code-defined: personas are never created or destroyed at runtime.
//!
//! # Module Structure
//!
//! - `model`: The `Persona` type
//! - `preset`: The built-in persona catalog and id resolution
//!
//! # Usage
//!
//! ```ignore
//! use advisor_core::persona::{resolve_persona, DEFAULT_PERSONA_ID};
//! ```

mod model;
mod preset;

// Re-export public API
pub use model::Persona;
pub use preset::{DEFAULT_PERSONA_ID, all_personas, find_persona, resolve_persona};
