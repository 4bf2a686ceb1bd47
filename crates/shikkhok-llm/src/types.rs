//! Request and response types for the remote model boundary.

use serde::{Deserialize, Serialize};
use shikkhok_types::Message;

/// A completion request to the remote model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// System instruction prepended to the exchange.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Prior conversation turns plus the current query, oldest first.
    pub messages: Vec<Message>,
}

impl CompletionRequest {
    /// Create a request from messages.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            system: None,
            messages,
        }
    }

    /// Set the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// A normalized completion response.
///
/// All provider response shapes collapse to this at the backend boundary:
/// either the model said something or it did not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The model's text, if any was produced.
    pub text: Option<String>,
}

impl CompletionResponse {
    /// A response carrying text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// A response with no usable text.
    pub fn empty() -> Self {
        Self { text: None }
    }

    /// The text, treating whitespace-only output as empty.
    pub fn nonempty_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let req = CompletionRequest::new(vec![Message::user("2+2?")]).with_system("be brief");
        assert_eq!(req.system.as_deref(), Some("be brief"));
        assert_eq!(req.messages.len(), 1);
    }

    #[test]
    fn test_nonempty_text() {
        assert_eq!(
            CompletionResponse::text("hi").nonempty_text(),
            Some("hi")
        );
        assert_eq!(CompletionResponse::text("   ").nonempty_text(), None);
        assert_eq!(CompletionResponse::empty().nonempty_text(), None);
    }
}
