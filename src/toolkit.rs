use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use llmapi::LLMClient;
use tracing::info;

use crate::config::{GeminiSettings, ToolkitSettings};
use crate::constants::{OUTPUT_EXTENSION, PROMPT_PREVIEW_CHARS};
use crate::credentials::{resolve_api_key, CredentialProvider};
use crate::error::{Result, ToolkitError};
use crate::fs_utils::{default_assets_root, resolve_output_dir, unique_file_name, write_image};
use crate::models::{ImageConfig, Mode, OutputKind};

/// Gemini-backed image operations. Holds no per-call state; every call
/// resolves its credential, output directory and file name afresh.
pub struct ImageToolkit {
    pub(crate) settings: GeminiSettings,
    pub(crate) assets_root: PathBuf,
    pub(crate) credentials: Arc<dyn CredentialProvider>,
}

impl ImageToolkit {
    pub fn new(
        settings: GeminiSettings,
        assets_root: impl Into<PathBuf>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            settings,
            assets_root: assets_root.into(),
            credentials,
        }
    }

    /// Build from loaded settings, defaulting the assets root relative to
    /// the current working directory.
    pub fn from_settings(
        settings: &ToolkitSettings,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let assets_root = match &settings.output.assets_root {
            Some(root) => root.clone(),
            None => {
                let cwd = std::env::current_dir().map_err(|err| {
                    ToolkitError::io("Unable to resolve working directory", ".", err)
                })?;
                default_assets_root(&cwd)
            }
        };
        Ok(Self::new(settings.gemini.clone(), assets_root, credentials))
    }

    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    pub(crate) fn api_key(&self, mode: Mode) -> Result<String> {
        resolve_api_key(self.credentials.as_ref(), &self.settings.api_key_env, mode)
    }

    pub(crate) fn client(&self, api_key: String, model: &str) -> LLMClient {
        LLMClient::new(api_key, self.settings.endpoint.as_str(), model)
    }

    /// Reserve a collision-free `.png` path for a result of `kind`, creating
    /// its directory.
    pub(crate) async fn reserve_output_path(
        &self,
        config: &ImageConfig,
        kind: OutputKind,
        base_name: &str,
    ) -> Result<PathBuf> {
        let today = Utc::now().date_naive();
        let directory = resolve_output_dir(config, &self.assets_root, kind, today);
        unique_file_name(&directory, base_name, OUTPUT_EXTENSION, kind.is_edit()).await
    }

    pub(crate) async fn save_output(
        &self,
        config: &ImageConfig,
        kind: OutputKind,
        base_name: &str,
        bytes: &[u8],
    ) -> Result<(PathBuf, u64)> {
        let output_path = self.reserve_output_path(config, kind, base_name).await?;
        info!(path = %output_path.display(), bytes = bytes.len(), "saving image");
        let size = write_image(&output_path, bytes).await?;
        Ok((output_path, size))
    }
}

/// First characters of a prompt, for mock-mode summaries.
pub(crate) fn preview(text: &str) -> String {
    text.chars().take(PROMPT_PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_respects_char_boundaries() {
        let prompt = "é".repeat(80);
        assert_eq!(preview(&prompt).chars().count(), PROMPT_PREVIEW_CHARS);
        assert_eq!(preview("short"), "short");
    }
}
