//! Exact-string answer memoization.
//!
//! Keyed by `(subject, query)`, unbounded, process-lifetime, no eviction. A
//! hit short-circuits every source. Only remote-AI answers are stored; the
//! local sources are cheap enough to re-run.

use parking_lot::Mutex;
use std::collections::HashMap;

use shikkhok_types::Resolution;

/// Process-lifetime answer cache.
#[derive(Debug, Default)]
pub struct MemoCache {
    entries: Mutex<HashMap<(String, String), Resolution>>,
}

impl MemoCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached resolution.
    pub fn get(&self, subject: &str, query: &str) -> Option<Resolution> {
        self.entries
            .lock()
            .get(&(subject.to_string(), query.to_string()))
            .cloned()
    }

    /// Store a resolution.
    pub fn put(&self, subject: &str, query: &str, resolution: Resolution) {
        self.entries
            .lock()
            .insert((subject.to_string(), query.to_string()), resolution);
    }

    /// Number of cached answers.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shikkhok_types::AnswerSource;

    #[test]
    fn test_get_put() {
        let cache = MemoCache::new();
        assert!(cache.get("math", "2+2").is_none());

        cache.put(
            "math",
            "2+2",
            Resolution::new(AnswerSource::RemoteAi, "four"),
        );
        let hit = cache.get("math", "2+2").unwrap();
        assert_eq!(hit.text, "four");
        assert_eq!(hit.source, AnswerSource::RemoteAi);
    }

    #[test]
    fn test_subject_keys_are_distinct() {
        let cache = MemoCache::new();
        cache.put(
            "math",
            "define it",
            Resolution::new(AnswerSource::RemoteAi, "a math answer"),
        );
        assert!(cache.get("grammar", "define it").is_none());
        assert_eq!(cache.len(), 1);
    }
}
