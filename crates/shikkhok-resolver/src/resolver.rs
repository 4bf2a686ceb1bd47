//! The answer resolution chain.

use std::sync::Arc;
use tracing::{debug, info, warn};

use shikkhok_kb::KnowledgeBase;
use shikkhok_llm::{CompletionRequest, SharedBackend};
use shikkhok_types::{AnswerSource, Conversation, Message, Resolution, SourceOutcome};

use crate::calc;
use crate::error::{ResolveError, Result};
use crate::memo::MemoCache;
use crate::probe::SharedProbe;

/// Fixed message returned when no source can answer.
pub const OFFLINE_MESSAGE: &str =
    "দুঃখিত, এই প্রশ্নের উত্তর এখন দিতে পারছি না। (Offline — no answer available from local sources.)";

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Tunables for the resolution chain.
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Minimum similarity for a fuzzy knowledge-base match.
    pub similarity_threshold: f64,
    /// Enable the `(subject, query)` answer memo.
    pub memoize: bool,
    /// Subject key for memoization.
    pub subject: String,
    /// System instruction sent with every remote request.
    pub system_instruction: String,
    /// Most recent conversation turns included in the remote prompt.
    pub max_history_turns: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            memoize: false,
            subject: "general".to_string(),
            system_instruction: "You are Shikkhok, a friendly tutor for school students. \
                                 Answer clearly and briefly. Answer in the language of the question."
                .to_string(),
            max_history_turns: 20,
        }
    }
}

impl ResolverOptions {
    /// Set the fuzzy-match threshold.
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Enable memoization under `subject`.
    pub fn with_memoization(mut self, subject: impl Into<String>) -> Self {
        self.memoize = true;
        self.subject = subject.into();
        self
    }

    /// Set the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolver
// ─────────────────────────────────────────────────────────────────────────────

/// The multi-source answer resolver.
///
/// Owns no session state beyond the memo cache; the conversation belongs to
/// the caller, who also appends the produced turn pair.
pub struct Resolver {
    kb: Arc<KnowledgeBase>,
    llm: Option<SharedBackend>,
    probe: SharedProbe,
    memo: MemoCache,
    options: ResolverOptions,
}

impl Resolver {
    /// Create a resolver.
    ///
    /// `llm` may be `None` (no API key configured); the chain then runs
    /// without its remote source.
    pub fn new(
        kb: Arc<KnowledgeBase>,
        llm: Option<SharedBackend>,
        probe: SharedProbe,
        options: ResolverOptions,
    ) -> Self {
        Self {
            kb,
            llm,
            probe,
            memo: MemoCache::new(),
            options,
        }
    }

    /// Resolve a query against the source chain.
    ///
    /// Fails only for an empty query. Collaborator failures fold into
    /// fallthrough; the chain always produces exactly one resolution.
    pub async fn resolve(&self, query: &str, conversation: &Conversation) -> Result<Resolution> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ResolveError::EmptyQuery);
        }

        if self.options.memoize
            && let Some(hit) = self.memo.get(&self.options.subject, query)
        {
            debug!(subject = %self.options.subject, "memo hit, skipping all sources");
            return Ok(hit);
        }

        for source in [
            AnswerSource::Calculator,
            AnswerSource::LocalKb,
            AnswerSource::RemoteAi,
        ] {
            let outcome = match source {
                AnswerSource::Calculator => self.try_calculator(query),
                AnswerSource::LocalKb => self.try_knowledge_base(query),
                AnswerSource::RemoteAi => self.try_remote(query, conversation).await,
                AnswerSource::Fallback => unreachable!(),
            };

            match outcome {
                SourceOutcome::Answered(text) => {
                    info!(source = %source, "query resolved");
                    let resolution = Resolution::new(source, text);
                    if self.options.memoize && source == AnswerSource::RemoteAi {
                        self.memo
                            .put(&self.options.subject, query, resolution.clone());
                    }
                    return Ok(resolution);
                }
                SourceOutcome::Empty => {
                    debug!(source = %source, "no answer from source");
                }
                SourceOutcome::Failed(reason) => {
                    warn!(source = %source, reason, "source failed, falling through");
                }
            }
        }

        info!(source = %AnswerSource::Fallback, "query resolved");
        Ok(Resolution::new(AnswerSource::Fallback, OFFLINE_MESSAGE))
    }

    fn try_calculator(&self, query: &str) -> SourceOutcome {
        match calc::evaluate(query) {
            Some(result) => SourceOutcome::Answered(result),
            None => SourceOutcome::Empty,
        }
    }

    fn try_knowledge_base(&self, query: &str) -> SourceOutcome {
        match self.kb.lookup(query, self.options.similarity_threshold) {
            Some(entry) => SourceOutcome::Answered(entry.answer.clone()),
            None => SourceOutcome::Empty,
        }
    }

    async fn try_remote(&self, query: &str, conversation: &Conversation) -> SourceOutcome {
        let Some(ref backend) = self.llm else {
            debug!("no remote backend configured");
            return SourceOutcome::Empty;
        };

        if !self.probe.is_online().await {
            info!("offline, skipping remote source");
            return SourceOutcome::Empty;
        }

        let request = self.build_request(query, conversation);
        match backend.complete(request).await {
            Ok(response) => match response.nonempty_text() {
                Some(text) => SourceOutcome::Answered(text.to_string()),
                None => SourceOutcome::Empty,
            },
            // Auth, quota, timeout — all swallowed into fallthrough, the
            // reason goes to the log only
            Err(e) => SourceOutcome::Failed(e.to_string()),
        }
    }

    fn build_request(&self, query: &str, conversation: &Conversation) -> CompletionRequest {
        let turns = conversation.turns();
        let start = turns.len().saturating_sub(self.options.max_history_turns);
        let mut messages: Vec<Message> = turns[start..].to_vec();
        messages.push(Message::user(query));

        CompletionRequest::new(messages).with_system(self.options.system_instruction.clone())
    }

    /// The memo cache (exposed for inspection in the CLI and tests).
    pub fn memo(&self) -> &MemoCache {
        &self.memo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::FixedProbe;
    use shikkhok_types::KnowledgeEntry;

    fn offline_resolver(kb: KnowledgeBase) -> Resolver {
        Resolver::new(
            Arc::new(kb),
            None,
            Arc::new(FixedProbe(false)),
            ResolverOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_empty_query_is_validation_error() {
        let resolver = offline_resolver(KnowledgeBase::empty());
        let convo = Conversation::new();

        assert_eq!(
            resolver.resolve("", &convo).await.unwrap_err(),
            ResolveError::EmptyQuery
        );
        assert_eq!(
            resolver.resolve("   \t  ", &convo).await.unwrap_err(),
            ResolveError::EmptyQuery
        );
    }

    #[tokio::test]
    async fn test_calculator_beats_knowledge_base() {
        // A KB entry whose question is contained in the query must lose to
        // the calculator
        let kb = KnowledgeBase::from_entries(vec![KnowledgeEntry::new("2+2", "from the kb")]);
        let resolver = offline_resolver(kb);

        let res = resolver.resolve("2+2", &Conversation::new()).await.unwrap();
        assert_eq!(res.source, AnswerSource::Calculator);
        assert_eq!(res.text, "4");
    }

    #[tokio::test]
    async fn test_equation_resolved_by_calculator() {
        let resolver = offline_resolver(KnowledgeBase::empty());
        let res = resolver
            .resolve("x^2-4=0", &Conversation::new())
            .await
            .unwrap();
        assert_eq!(res.source, AnswerSource::Calculator);
        assert_eq!(res.text, "x = -2 or x = 2");
    }

    #[tokio::test]
    async fn test_kb_answer() {
        let kb = KnowledgeBase::from_entries(vec![KnowledgeEntry::new(
            "বিশেষ্য কী",
            "যে পদ দিয়ে নাম বোঝায়",
        )]);
        let resolver = offline_resolver(kb);

        let res = resolver
            .resolve("বিশেষ্য কী", &Conversation::new())
            .await
            .unwrap();
        assert_eq!(res.source, AnswerSource::LocalKb);
        assert_eq!(res.text, "যে পদ দিয়ে নাম বোঝায়");
        assert_eq!(res.display_label, "Knowledge Base");
    }

    #[tokio::test]
    async fn test_offline_miss_is_fallback() {
        let resolver = offline_resolver(KnowledgeBase::empty());
        let res = resolver
            .resolve("what is photosynthesis", &Conversation::new())
            .await
            .unwrap();
        assert_eq!(res.source, AnswerSource::Fallback);
        assert_eq!(res.text, OFFLINE_MESSAGE);
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let kb = KnowledgeBase::from_entries(vec![KnowledgeEntry::new("gravity", "a force")]);
        let resolver = offline_resolver(kb);
        let convo = Conversation::new();

        let first = resolver.resolve("what is gravity", &convo).await.unwrap();
        let second = resolver.resolve("what is gravity", &convo).await.unwrap();
        assert_eq!(first.source, second.source);
        assert_eq!(first.text, second.text);
    }

    #[tokio::test]
    async fn test_request_history_is_capped() {
        let resolver = offline_resolver(KnowledgeBase::empty());
        let mut convo = Conversation::new();
        for i in 0..30 {
            convo.push_exchange(format!("q{i}"), format!("a{i}"));
        }

        let request = resolver.build_request("latest", &convo);
        // 20 history turns plus the current query
        assert_eq!(request.messages.len(), 21);
        assert_eq!(request.messages.last().unwrap().content, "latest");
        assert_eq!(request.messages[0].content, "q20");
    }
}
