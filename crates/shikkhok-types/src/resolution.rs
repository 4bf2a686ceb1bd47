//! Resolution result types.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Answer Source
// ─────────────────────────────────────────────────────────────────────────────

/// The answer sources in the resolution chain, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// Local arithmetic/symbolic evaluator.
    Calculator,
    /// In-memory knowledge base lookup.
    LocalKb,
    /// Remote generative model.
    RemoteAi,
    /// Fixed offline/no-answer message.
    Fallback,
}

impl AnswerSource {
    /// Get the string name for this source.
    pub fn name(&self) -> &'static str {
        match self {
            AnswerSource::Calculator => "calculator",
            AnswerSource::LocalKb => "local_kb",
            AnswerSource::RemoteAi => "remote_ai",
            AnswerSource::Fallback => "fallback",
        }
    }

    /// Human-readable label shown next to the answer in the UI.
    pub fn display_label(&self) -> &'static str {
        match self {
            AnswerSource::Calculator => "Calculator",
            AnswerSource::LocalKb => "Knowledge Base",
            AnswerSource::RemoteAi => "AI",
            AnswerSource::Fallback => "Offline",
        }
    }
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// The answer produced for a single query.
///
/// Exactly one of these is produced per query; the chain stops at the first
/// source that yields non-empty output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// The answer text.
    pub text: String,
    /// Which source produced it.
    pub source: AnswerSource,
    /// Label for display alongside the answer.
    pub display_label: String,
}

impl Resolution {
    /// Create a resolution from a source and its text.
    pub fn new(source: AnswerSource, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source,
            display_label: source.display_label().to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Source Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// What a single source attempt produced.
///
/// Collaborator failures are data, not control flow: a source that errors
/// reports `Failed` and the chain moves on to the next source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The source produced a usable answer.
    Answered(String),
    /// The source had nothing to say (not an error).
    Empty,
    /// The source failed; the reason is logged, never surfaced as the answer.
    Failed(String),
}

impl SourceOutcome {
    /// Whether this outcome stops the chain.
    pub fn is_answered(&self) -> bool {
        matches!(self, SourceOutcome::Answered(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_names() {
        assert_eq!(AnswerSource::Calculator.name(), "calculator");
        assert_eq!(AnswerSource::LocalKb.name(), "local_kb");
        assert_eq!(AnswerSource::RemoteAi.name(), "remote_ai");
        assert_eq!(AnswerSource::Fallback.name(), "fallback");
    }

    #[test]
    fn test_resolution_carries_label() {
        let res = Resolution::new(AnswerSource::LocalKb, "answer");
        assert_eq!(res.source, AnswerSource::LocalKb);
        assert_eq!(res.display_label, "Knowledge Base");
    }

    #[test]
    fn test_outcome_is_answered() {
        assert!(SourceOutcome::Answered("4".into()).is_answered());
        assert!(!SourceOutcome::Empty.is_answered());
        assert!(!SourceOutcome::Failed("timeout".into()).is_answered());
    }
}
