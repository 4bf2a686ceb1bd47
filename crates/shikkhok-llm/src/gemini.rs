//! Gemini generateContent backend.
//!
//! Speaks the `v1beta/models/{model}:generateContent` REST interface and
//! normalizes the response into [`CompletionResponse`] in one place, so no
//! provider-specific shape handling leaks past this file.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use shikkhok_types::Role;

use crate::backend::LlmBackend;
use crate::error::{LlmError, Result};
use crate::types::{CompletionRequest, CompletionResponse};

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for the Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key.
    pub api_key: String,
    /// Model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// API base URL (overridable for tests).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Create a config with default base URL and a 30 s timeout.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend
// ─────────────────────────────────────────────────────────────────────────────

/// Gemini REST backend.
pub struct GeminiBackend {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiBackend {
    /// Create a backend from configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Config("Gemini API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Build the generateContent payload for a request.
    fn build_payload(&self, request: &CompletionRequest) -> serde_json::Value {
        let contents: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                json!({
                    "role": role,
                    "parts": [{"text": m.content}],
                })
            })
            .collect();

        let mut payload = json!({ "contents": contents });
        if let Some(ref system) = request.system {
            payload["systemInstruction"] = json!({
                "parts": [{"text": system}],
            });
        }
        payload
    }
}

#[async_trait]
impl LlmBackend for GeminiBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let payload = self.build_payload(&request);

        debug!(model = %self.config.model, turns = request.messages.len(), "gemini request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = extract_error_message(&body)
                .unwrap_or_else(|| format!("HTTP {}: {}", status, body));
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Auth(message),
                429 => LlmError::Quota(message),
                _ => LlmError::Backend(message),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(parsed.into_completion())
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Pull `error.message` out of a provider error body, if present.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(|s| s.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Normalization
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenate the first candidate's text parts; `None` when absent.
    fn into_completion(self) -> CompletionResponse {
        let text = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.trim().is_empty());

        match text {
            Some(t) => CompletionResponse::text(t),
            None => CompletionResponse::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shikkhok_types::Message;

    fn backend() -> GeminiBackend {
        GeminiBackend::new(GeminiConfig::new("test-key", "gemini-2.5-flash")).unwrap()
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(GeminiBackend::new(GeminiConfig::new("  ", "gemini-2.5-flash")).is_err());
    }

    #[test]
    fn test_payload_roles_and_system() {
        let request = CompletionRequest::new(vec![
            Message::user("what is gravity"),
            Message::assistant("a force"),
            Message::user("and mass?"),
        ])
        .with_system("be brief");

        let payload = backend().build_payload(&request);

        let contents = payload["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "and mass?");
        assert_eq!(payload["systemInstruction"]["parts"][0]["text"], "be brief");
    }

    #[test]
    fn test_payload_without_system() {
        let request = CompletionRequest::new(vec![Message::user("hi")]);
        let payload = backend().build_payload(&request);
        assert!(payload.get("systemInstruction").is_none());
    }

    #[test]
    fn test_normalize_text_response() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "মাধ্যাকর্ষণ "}, {"text": "একটি বল"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let completion = parsed.into_completion();
        assert_eq!(completion.nonempty_text(), Some("মাধ্যাকর্ষণ একটি বল"));
    }

    #[test]
    fn test_normalize_no_candidates() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.into_completion().nonempty_text().is_none());
    }

    #[test]
    fn test_normalize_blank_parts() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.into_completion().nonempty_text().is_none());
    }

    #[test]
    fn test_normalize_safety_blocked_candidate() {
        // A blocked candidate has no content at all
        let body = r#"{"candidates": [{"finishReason": "SAFETY"}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.into_completion().nonempty_text().is_none());
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted"}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Resource has been exhausted")
        );
        assert!(extract_error_message("not json").is_none());
    }
}
