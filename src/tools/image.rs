use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::{optional_str, required_str, Tool};
use crate::models::{ImageConfig, Mode};
use crate::toolkit::ImageToolkit;

fn image_config(params: &Value) -> ImageConfig {
    ImageConfig {
        output_dir: optional_str(params, "outputDir").map(PathBuf::from),
        custom_name: optional_str(params, "filename").map(str::to_string),
    }
}

/// `generate`: text-to-image
pub struct GenerateTool {
    toolkit: Arc<ImageToolkit>,
    mode: Mode,
}

impl GenerateTool {
    pub fn new(toolkit: Arc<ImageToolkit>, mode: Mode) -> Self {
        Self { toolkit, mode }
    }
}

#[async_trait]
impl Tool for GenerateTool {
    fn name(&self) -> &str {
        "generate"
    }

    fn description(&self) -> &str {
        "Generate an image using Gemini from a text prompt"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "Text description of the image to generate"
                },
                "outputDir": {
                    "type": "string",
                    "description": "Custom output directory (default: assets/images/YYYY-MM-DD/)"
                },
                "filename": {
                    "type": "string",
                    "description": "Custom filename (default: generated)"
                }
            },
            "required": ["prompt"]
        })
    }

    async fn execute(&self, params: Value) -> Result<String> {
        let prompt = required_str(&params, "prompt")?;
        let config = image_config(&params);
        Ok(self
            .toolkit
            .generate_image(prompt, &config, self.mode)
            .await?)
    }
}

/// `edit`: image + instruction to image
pub struct EditTool {
    toolkit: Arc<ImageToolkit>,
    mode: Mode,
}

impl EditTool {
    pub fn new(toolkit: Arc<ImageToolkit>, mode: Mode) -> Self {
        Self { toolkit, mode }
    }
}

#[async_trait]
impl Tool for EditTool {
    fn name(&self) -> &str {
        "edit"
    }

    fn description(&self) -> &str {
        "Edit an existing image using Gemini"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "image": {
                    "type": "string",
                    "description": "File path or data URL of image to edit"
                },
                "prompt": {
                    "type": "string",
                    "description": "Edit instruction"
                },
                "outputDir": {
                    "type": "string",
                    "description": "Custom output directory (default: assets/images/YYYY-MM-DD/)"
                },
                "filename": {
                    "type": "string",
                    "description": "Custom filename (default: original name with _edit_XXX)"
                }
            },
            "required": ["image", "prompt"]
        })
    }

    async fn execute(&self, params: Value) -> Result<String> {
        let image = required_str(&params, "image")?;
        let prompt = required_str(&params, "prompt")?;
        let config = image_config(&params);
        Ok(self
            .toolkit
            .edit_image(image, prompt, &config, self.mode)
            .await?)
    }
}

/// `analyze`: image + question to text
pub struct AnalyzeTool {
    toolkit: Arc<ImageToolkit>,
    mode: Mode,
}

impl AnalyzeTool {
    pub fn new(toolkit: Arc<ImageToolkit>, mode: Mode) -> Self {
        Self { toolkit, mode }
    }
}

#[async_trait]
impl Tool for AnalyzeTool {
    fn name(&self) -> &str {
        "analyze"
    }

    fn description(&self) -> &str {
        "Analyze an image using Gemini (text analysis only)"
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "image": {
                    "type": "string",
                    "description": "File path or data URL of image to analyze"
                },
                "question": {
                    "type": "string",
                    "description": "What to analyze about the image"
                }
            },
            "required": ["image", "question"]
        })
    }

    async fn execute(&self, params: Value) -> Result<String> {
        let image = required_str(&params, "image")?;
        let question = required_str(&params, "question")?;
        Ok(self
            .toolkit
            .analyze_image(image, question, self.mode)
            .await?)
    }
}

/// Registry holding the three image tools, all running in `mode`.
pub fn image_tool_registry(toolkit: Arc<ImageToolkit>, mode: Mode) -> super::ToolRegistry {
    let mut registry = super::ToolRegistry::new();
    registry.register(GenerateTool::new(toolkit.clone(), mode));
    registry.register(EditTool::new(toolkit.clone(), mode));
    registry.register(AnalyzeTool::new(toolkit, mode));
    registry
}
