//! Configuration types.
//!
//! Every field has a default so that a partial (or absent) config file still
//! yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Env var consulted for the remote model API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

// ─────────────────────────────────────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration for the tutor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShikkhokConfig {
    /// Knowledge base settings.
    pub knowledge: KnowledgeConfig,
    /// Connectivity probe settings.
    pub probe: ProbeConfig,
    /// Remote model settings.
    pub llm: LlmConfig,
    /// Resolution chain settings.
    pub resolver: ResolverConfig,
    /// Speech synthesis settings.
    pub speech: SpeechConfig,
}

impl ShikkhokConfig {
    /// Create a config with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay `other` onto `self`, field group by field group.
    ///
    /// TOML layering is whole-section: a section present in the later file
    /// replaces the same section from the earlier file.
    pub fn merge(&mut self, other: ShikkhokConfig, present: &SectionsPresent) {
        if present.knowledge {
            self.knowledge = other.knowledge;
        }
        if present.probe {
            self.probe = other.probe;
        }
        if present.llm {
            self.llm = other.llm;
        }
        if present.resolver {
            self.resolver = other.resolver;
        }
        if present.speech {
            self.speech = other.speech;
        }
    }
}

/// Which sections appeared in a parsed config file.
///
/// Used by the discovery layer to merge only the sections a file actually
/// specifies.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionsPresent {
    pub knowledge: bool,
    pub probe: bool,
    pub llm: bool,
    pub resolver: bool,
    pub speech: bool,
}

impl SectionsPresent {
    /// Inspect a raw TOML document for top-level section presence.
    pub fn from_toml(doc: &toml::Value) -> Self {
        let has = |key: &str| doc.get(key).is_some();
        Self {
            knowledge: has("knowledge"),
            probe: has("probe"),
            llm: has("llm"),
            resolver: has("resolver"),
            speech: has("speech"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

/// Knowledge base settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Directory scanned for `*.jsonl` / `*.ndjson` entry files.
    pub dir: PathBuf,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("knowledge"),
        }
    }
}

/// Connectivity probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Host probed for reachability.
    pub host: String,
    /// Port probed for reachability.
    pub port: u16,
    /// Connect timeout in seconds.
    pub timeout_secs: u64,
    /// How long a probe reading stays valid, in seconds.
    pub cache_secs: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: "8.8.8.8".to_string(),
            port: 53,
            timeout_secs: 3,
            cache_secs: 60,
        }
    }
}

/// Remote model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier.
    pub model: String,
    /// API key. Prefer the env var; a key here is a plaintext fallback.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// System instruction prepended to every request.
    pub system_instruction: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_key: None,
            timeout_secs: 30,
            system_instruction: "You are Shikkhok, a friendly tutor for school students. \
                                 Answer clearly and briefly. Answer in the language of the question."
                .to_string(),
        }
    }
}

impl LlmConfig {
    /// Resolve the API key: env var first, then config file.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            return Ok(key);
        }
        if let Some(ref key) = self.api_key
            && !key.trim().is_empty()
        {
            return Ok(key.clone());
        }
        Err(ConfigError::ApiKeyNotFound {
            env_var: API_KEY_ENV.to_string(),
        })
    }
}

/// Resolution chain settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum similarity for a fuzzy knowledge-base match.
    pub similarity_threshold: f64,
    /// Enable the per-subject answer memo cache.
    pub memoize: bool,
    /// Subject key used for memoization.
    pub subject: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
            memoize: false,
            subject: "general".to_string(),
        }
    }
}

/// Speech synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Language code used when no script is recognized in the text.
    pub default_lang: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            default_lang: "en".to_string(),
        }
    }
}
