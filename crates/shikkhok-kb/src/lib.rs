//! Local knowledge base for the Shikkhok tutor.
//!
//! Entries are loaded once at startup from newline-delimited JSON files and
//! held in memory, read-only, for the process lifetime. Nothing in here is
//! fatal: malformed lines, unreadable files, and a missing directory all
//! degrade to a smaller (possibly empty) knowledge base with a warning.

pub mod loader;
pub mod matcher;

pub use loader::{KnowledgeBase, LoadStats};
pub use matcher::similarity;
