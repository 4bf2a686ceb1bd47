//! Backend trait for remote model providers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{CompletionRequest, CompletionResponse};

/// A remote model backend.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Execute a completion request.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Shared reference to a backend.
pub type SharedBackend = Arc<dyn LlmBackend>;
