//! Configuration system for the Shikkhok tutor.
//!
//! Provides TOML-based configuration with:
//! - Config file layering (XDG user config + project-local overrides)
//! - API key resolution (env var → config file)
//! - Defaults for every section, so a missing file is never fatal

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{LoadedConfig, load_config, load_config_file, xdg_config_dir, xdg_config_path};
pub use error::{ConfigError, Result};
pub use types::{
    KnowledgeConfig, LlmConfig, ProbeConfig, ResolverConfig, ShikkhokConfig, SpeechConfig,
};
