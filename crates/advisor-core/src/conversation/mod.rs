//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: Chat message and role types
//! - `model`: The stored `Conversation` and insert payload
//! - `repository`: Repository trait for conversation persistence

mod message;
mod model;
mod repository;

pub use message::{ChatMessage, MessageRole};
pub use model::{Conversation, DEFAULT_TITLE, NewConversation, TITLE_MAX_CHARS, derive_title};
pub use repository::ConversationRepository;
