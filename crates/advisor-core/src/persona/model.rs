//! Persona domain model.
//!
//! Represents an AI advisor with a fixed specialty and a system prompt that
//! conditions every generated reply.

use serde::Serialize;

/// An expert advisor persona.
///
/// Personas are immutable and live for the whole process, so all fields are
/// static strings. The system prompt is never serialized to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    /// Stable identifier used in URLs and stored rows (e.g. `therapist`)
    pub id: &'static str,
    /// Name shown in the UI
    pub display_name: &'static str,
    /// Short specialty label
    pub specialty_label: &'static str,
    /// Avatar glyph
    pub avatar: &'static str,
    /// One-line description for the persona picker
    pub description: &'static str,
    /// Prompt sent as the system instruction to the generation API
    #[serde(skip_serializing)]
    pub system_prompt: &'static str,
}
