//! Config file discovery and layered merging.
//!
//! Resolution order (later overrides earlier, section by section):
//! 1. `~/.config/shikkhok/config.toml` (XDG user config)
//! 2. `./shikkhok.toml` (project-local)
//! 3. CLI arguments (handled externally)

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::types::{SectionsPresent, ShikkhokConfig};

/// Default config filename for project-local config.
const PROJECT_CONFIG_FILE: &str = "shikkhok.toml";

/// Default config filename within the XDG config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for XDG directory resolution.
const APP_NAME: &str = "shikkhok";

/// Env var overriding the user config directory.
const CONFIG_DIR_ENV: &str = "SHIKKHOK_CONFIG_DIR";

/// Result of config discovery and loading.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The merged configuration.
    pub config: ShikkhokConfig,
    /// Paths that were actually loaded, in merge order.
    pub loaded_from: Vec<PathBuf>,
}

/// Load configuration by discovering and merging all config layers.
///
/// Missing files are skipped silently; unreadable or unparsable files are
/// errors.
pub fn load_config(project_dir: Option<&Path>) -> Result<LoadedConfig> {
    let mut config = ShikkhokConfig::new();
    let mut loaded_from = Vec::new();

    // 1. User config — env var override, then platform default
    if let Some(path) = xdg_config_path() {
        load_layer(&mut config, &path, &mut loaded_from)?;
    }

    // 2. Project-local config
    let project_path = project_dir
        .map(|d| d.join(PROJECT_CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));
    load_layer(&mut config, &project_path, &mut loaded_from)?;

    Ok(LoadedConfig {
        config,
        loaded_from,
    })
}

/// Load config from a specific file path (no discovery, no merging).
pub fn load_config_file(path: &Path) -> Result<ShikkhokConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(toml::from_str(&contents)?)
}

/// The user config directory (`~/.config/shikkhok` or platform equivalent).
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Full path to the user config file.
pub fn xdg_config_path() -> Option<PathBuf> {
    xdg_config_dir().map(|d| d.join(USER_CONFIG_FILE))
}

/// Merge one file into the accumulated config, if it exists.
fn load_layer(
    config: &mut ShikkhokConfig,
    path: &Path,
    loaded_from: &mut Vec<PathBuf>,
) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;

    let doc: toml::Value = toml::from_str(&contents)?;
    let present = SectionsPresent::from_toml(&doc);
    let layer: ShikkhokConfig = doc.try_into()?;

    config.merge(layer, &present);
    loaded_from.push(path.to_path_buf());
    Ok(())
}
