use std::path::PathBuf;

use llmapi::LLMError;

#[derive(Debug, thiserror::Error)]
pub enum ToolkitError {
    #[error("{0} is not set")]
    Auth(String),

    #[error("{action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("{0}")]
    Response(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("{0}")]
    InvalidArgument(String),
}

impl ToolkitError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ToolkitError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

impl From<LLMError> for ToolkitError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::Api { status, body } => ToolkitError::Api { status, body },
            LLMError::Transport(source) => ToolkitError::Transport(source.to_string()),
            other => ToolkitError::Response(other.to_string()),
        }
    }
}

pub type Result<T, E = ToolkitError> = std::result::Result<T, E>;
