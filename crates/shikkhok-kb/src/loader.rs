//! NDJSON knowledge base loading.

use std::path::Path;

use shikkhok_types::KnowledgeEntry;
use tracing::{debug, warn};

use crate::matcher;

/// Counters from a load pass, for logging and the `kb` CLI command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Files successfully opened.
    pub files: usize,
    /// Entries loaded.
    pub entries: usize,
    /// Lines skipped as malformed.
    pub skipped_lines: usize,
    /// Files skipped as unreadable.
    pub skipped_files: usize,
}

/// The in-memory knowledge base.
///
/// Entry order is load order (files sorted by name, lines in file order) and
/// is part of the lookup contract: fuzzy-match ties go to the first maximal
/// entry.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    stats: LoadStats,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a knowledge base from entries already in hand (mainly tests).
    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> Self {
        let stats = LoadStats {
            entries: entries.len(),
            ..Default::default()
        };
        Self { entries, stats }
    }

    /// Load every `*.jsonl` / `*.ndjson` file under `dir`.
    ///
    /// A missing or unreadable directory yields an empty knowledge base with
    /// a warning; the resolver chain still works without local answers.
    pub fn load_dir(dir: &Path) -> Self {
        let mut entries = Vec::new();
        let mut stats = LoadStats::default();

        let read_dir = match std::fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "knowledge directory unavailable");
                return Self::empty();
            }
        };

        let mut paths: Vec<_> = read_dir
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                matches!(
                    p.extension().and_then(|e| e.to_str()),
                    Some("jsonl") | Some("ndjson")
                )
            })
            .collect();
        // Stable entry order across runs
        paths.sort();

        for path in paths {
            let contents = match std::fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unreadable knowledge file");
                    stats.skipped_files += 1;
                    continue;
                }
            };

            stats.files += 1;
            for (lineno, line) in contents.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<KnowledgeEntry>(line) {
                    Ok(entry) => entries.push(entry),
                    Err(e) => {
                        warn!(
                            file = %path.display(),
                            line = lineno + 1,
                            error = %e,
                            "skipping malformed knowledge entry"
                        );
                        stats.skipped_lines += 1;
                    }
                }
            }
        }

        stats.entries = entries.len();
        debug!(
            files = stats.files,
            entries = stats.entries,
            skipped_lines = stats.skipped_lines,
            "knowledge base loaded"
        );
        Self { entries, stats }
    }

    /// The entries in load order.
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the knowledge base is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counters from the load pass.
    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    /// Look up an answer for `query`.
    ///
    /// Containment first: the first entry whose lowercased question appears
    /// as a substring of the lowercased query wins. Otherwise the entry with
    /// the highest similarity wins, if that similarity reaches `threshold`.
    pub fn lookup(&self, query: &str, threshold: f64) -> Option<&KnowledgeEntry> {
        let query_lower = query.to_lowercase();

        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| !e.question.is_empty() && query_lower.contains(&e.question.to_lowercase()))
        {
            return Some(entry);
        }

        // Strict `>` keeps the first maximal entry on ties; magnitude alone
        // does not define a winner.
        let mut best: Option<(&KnowledgeEntry, f64)> = None;
        for entry in &self.entries {
            let score = matcher::similarity(&query_lower, &entry.question.to_lowercase());
            if best.map(|(_, b)| score > b).unwrap_or(true) {
                best = Some((entry, score));
            }
        }

        best.filter(|&(_, score)| score >= threshold)
            .map(|(entry, _)| entry)
    }
}
