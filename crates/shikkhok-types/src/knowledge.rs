//! Knowledge base entry type.

use serde::{Deserialize, Serialize};

/// A single question/answer pair from the local knowledge base.
///
/// Entries are loaded once at startup and never mutated afterwards. Load
/// order is significant: fuzzy-match ties are broken by the first maximal
/// entry in sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
}

impl KnowledgeEntry {
    /// Create a new entry.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_ndjson_roundtrip() {
        let line = r#"{"question": "বিশেষ্য কী", "answer": "যে পদ দিয়ে কোনো কিছুর নাম বোঝায়"}"#;
        let entry: KnowledgeEntry = serde_json::from_str(line).unwrap();
        assert_eq!(entry.question, "বিশেষ্য কী");
        assert!(!entry.answer.is_empty());
    }

    #[test]
    fn test_entry_missing_field_rejected() {
        let line = r#"{"question": "only a question"}"#;
        assert!(serde_json::from_str::<KnowledgeEntry>(line).is_err());
    }
}
