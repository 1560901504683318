use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    API_KEY_ENV, DEFAULT_ANALYSIS_MODEL, DEFAULT_ANNOUNCE_PROGRAM, DEFAULT_GEMINI_ENDPOINT,
    DEFAULT_IDLE_PHRASE, DEFAULT_IMAGE_MODEL,
};

/// Settings file contents (`image-toolkit.toml`). Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolkitSettings {
    #[serde(default)]
    pub gemini: GeminiSettings,

    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub notifier: NotifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// Base URL the model id and `:generateContent` are appended to
    pub endpoint: String,

    /// Model used for generate and edit
    pub image_model: String,

    /// Model used for analyze
    pub analysis_model: String,

    /// Name of the credential holding the API key
    pub api_key_env: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            api_key_env: API_KEY_ENV.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Root of the date-partitioned image tree. Defaults to
    /// `assets/images` two levels above the working directory.
    #[serde(default)]
    pub assets_root: Option<PathBuf>,
}

/// Idle announcement settings. Disabled unless turned on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    pub enabled: bool,
    pub program: String,
    pub phrase: String,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: DEFAULT_ANNOUNCE_PROGRAM.to_string(),
            phrase: DEFAULT_IDLE_PHRASE.to_string(),
        }
    }
}

/// Load settings from `path`, falling back to defaults if it does not exist.
pub fn load_settings_from(path: &Path) -> Result<ToolkitSettings> {
    if !path.exists() {
        debug!("settings file not found at {}, using defaults", path.display());
        return Ok(ToolkitSettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid settings: {}", path.display()))
}
