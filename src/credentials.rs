use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

use crate::constants::TEST_API_KEY;
use crate::error::{Result, ToolkitError};
use crate::models::Mode;

/// Source of named API credentials.
pub trait CredentialProvider: Send + Sync {
    fn get_api_key(&self, name: &str) -> Result<String>;
}

static DOTENV_FILE: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Loads `.env` from the working directory (or its ancestors) into the
/// process environment the first time it is called; later calls only
/// return the path that was loaded.
fn load_dotenv_once() -> Option<&'static Path> {
    DOTENV_FILE
        .get_or_init(|| match dotenvy::dotenv() {
            Ok(path) => {
                debug!(path = %path.display(), "loaded .env");
                Some(path)
            }
            Err(err) => {
                debug!(error = %err, "no .env loaded");
                None
            }
        })
        .as_deref()
}

/// Reads credentials from the process environment. Construct it before
/// tool calls start: `new` loads `.env`, lookups only read variables.
#[derive(Debug, Clone, Copy)]
pub struct EnvCredentials {
    env_file: Option<&'static Path>,
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self {
            env_file: load_dotenv_once(),
        }
    }

    /// The `.env` file that was loaded, if any.
    pub fn env_file(&self) -> Option<&'static Path> {
        self.env_file
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialProvider for EnvCredentials {
    fn get_api_key(&self, name: &str) -> Result<String> {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ToolkitError::Auth(name.to_string()))
    }
}

/// Fixed in-memory credentials, for embedding hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticCredentials {
    keys: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.keys.insert(name.into(), value.into());
        self
    }
}

impl CredentialProvider for StaticCredentials {
    fn get_api_key(&self, name: &str) -> Result<String> {
        self.keys
            .get(name)
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or_else(|| ToolkitError::Auth(name.to_string()))
    }
}

/// Resolves `name`, except in mock mode where a placeholder is returned
/// without consulting the provider.
pub fn resolve_api_key(provider: &dyn CredentialProvider, name: &str, mode: Mode) -> Result<String> {
    match mode {
        Mode::Mock => Ok(TEST_API_KEY.to_string()),
        Mode::Live => provider.get_api_key(name),
    }
}
