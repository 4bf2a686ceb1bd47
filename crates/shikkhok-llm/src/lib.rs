//! Remote model adapter for the Shikkhok tutor.
//!
//! One backend trait, one concrete Gemini REST backend, and one normalization
//! boundary: whatever shape the provider returns, callers see
//! `Some(text)` or `None`.

pub mod backend;
pub mod error;
pub mod gemini;
pub mod types;

pub use backend::{LlmBackend, SharedBackend};
pub use error::{LlmError, Result};
pub use gemini::{GeminiBackend, GeminiConfig};
pub use types::{CompletionRequest, CompletionResponse};
