mod image;
mod registry;

pub use image::{image_tool_registry, AnalyzeTool, EditTool, GenerateTool};
pub use registry::ToolRegistry;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::error::ToolkitError;

/// A host-callable tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool
    fn name(&self) -> &str;

    /// A description of what this tool does
    fn description(&self) -> &str;

    /// JSON schema for the tool's parameters
    fn schema(&self) -> Value;

    /// Execute the tool with the given parameters
    async fn execute(&self, params: Value) -> Result<String>;

    /// Execute and fold any failure into an `Error: ...` result string, so
    /// errors never cross the tool boundary.
    async fn invoke(&self, params: Value) -> String {
        match self.execute(params).await {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(tool = self.name(), error = %err, "tool call failed");
                format!("Error: {err}")
            }
        }
    }
}

pub(crate) fn required_str<'a>(params: &'a Value, name: &str) -> Result<&'a str, ToolkitError> {
    params[name]
        .as_str()
        .ok_or_else(|| ToolkitError::InvalidArgument(format!("missing '{name}' parameter")))
}

pub(crate) fn optional_str<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params[name]
        .as_str()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
