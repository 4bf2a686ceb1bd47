//! CLI command handlers.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use shikkhok_config::ShikkhokConfig;
use shikkhok_kb::KnowledgeBase;
use shikkhok_llm::{GeminiBackend, GeminiConfig, SharedBackend};
use shikkhok_resolver::{Resolver, ResolverOptions, TcpProbe};

pub mod ask;
pub mod chat;
pub mod kb;
pub mod repl;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Merged configuration.
    pub config: ShikkhokConfig,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Build the resolver from configuration.
    ///
    /// A missing API key downgrades to a local-only resolver rather than
    /// failing; the chain still has the calculator, the knowledge base, and
    /// the fallback message.
    pub fn build_resolver(&self) -> Result<Resolver> {
        let kb = Arc::new(KnowledgeBase::load_dir(&self.config.knowledge.dir));

        let llm: Option<SharedBackend> = match self.config.llm.resolve_api_key() {
            Ok(api_key) => {
                let gemini = GeminiConfig::new(api_key, self.config.llm.model.clone())
                    .with_timeout(Duration::from_secs(self.config.llm.timeout_secs));
                Some(Arc::new(GeminiBackend::new(gemini)?))
            }
            Err(e) => {
                warn!("{e}; running with local sources only");
                None
            }
        };

        let ip: IpAddr = self
            .config
            .probe
            .host
            .parse()
            .unwrap_or_else(|_| IpAddr::from([8, 8, 8, 8]));
        let probe = Arc::new(TcpProbe::new(
            SocketAddr::new(ip, self.config.probe.port),
            Duration::from_secs(self.config.probe.timeout_secs),
            Duration::from_secs(self.config.probe.cache_secs),
        ));

        let mut options = ResolverOptions::default()
            .with_similarity_threshold(self.config.resolver.similarity_threshold)
            .with_system_instruction(self.config.llm.system_instruction.clone());
        if self.config.resolver.memoize {
            options = options.with_memoization(self.config.resolver.subject.clone());
        }

        Ok(Resolver::new(kb, llm, probe, options))
    }
}

/// Best-effort speech output: synthesize the answer and save the clip next
/// to the user's temp files, printing where it landed.
pub async fn speak_answer(text: &str, default_lang: &str) {
    use shikkhok_speech::{GttsSynthesizer, SpeechSynthesizer, language_hint};

    let lang = language_hint(text, default_lang);
    let synth = GttsSynthesizer::new();
    match synth.synthesize(text, lang).await {
        Some(clip) => {
            let path = std::env::temp_dir().join("shikkhok_answer.mp3");
            match std::fs::write(&path, &clip.bytes) {
                Ok(()) => {
                    let dim = console::Style::new().dim();
                    println!("{}", dim.apply_to(format!("[audio: {}]", path.display())));
                }
                Err(e) => warn!(error = %e, "failed to save audio clip"),
            }
        }
        None => {
            let dim = console::Style::new().dim();
            println!("{}", dim.apply_to("[voice playback unavailable]"));
        }
    }
}
