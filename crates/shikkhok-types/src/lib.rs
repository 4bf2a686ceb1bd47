//! Shared types for the Shikkhok tutor.

pub mod knowledge;
pub mod message;
pub mod resolution;

pub use knowledge::KnowledgeEntry;
pub use message::{Conversation, Message, Role};
pub use resolution::{AnswerSource, Resolution, SourceOutcome};

/// Unique identifier type used across the system.
pub type Id = uuid::Uuid;

/// Timestamp type used across the system.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a new unique identifier.
pub fn new_id() -> Id {
    uuid::Uuid::new_v4()
}

/// Get the current timestamp.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}
