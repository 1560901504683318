use llmapi::{response_to_image_data, send_generate_request, LLMMessageType};
use tracing::debug;

use crate::constants::DEFAULT_GENERATED_NAME;
use crate::error::Result;
use crate::fs_utils::{describe_input, edit_base_name, parse_image_input, strip_image_extension};
use crate::models::{ImageConfig, Mode, OutputKind};
use crate::toolkit::{preview, ImageToolkit};

impl ImageToolkit {
    /// Generate an image from `prompt` and save it under
    /// `<output>/generations`.
    pub async fn generate_image(
        &self,
        prompt: &str,
        config: &ImageConfig,
        mode: Mode,
    ) -> Result<String> {
        let api_key = self.api_key(mode)?;
        let base_name = config
            .custom_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(strip_image_extension)
            .unwrap_or(DEFAULT_GENERATED_NAME);

        if mode.is_mock() {
            let output_path = self
                .reserve_output_path(config, OutputKind::Generation, base_name)
                .await?;
            return Ok(format!(
                "[TEST MODE] Would generate image: {} for prompt: \"{}...\"",
                output_path.display(),
                preview(prompt)
            ));
        }

        let client = self.client(api_key, &self.settings.image_model);
        let response = send_generate_request(&client, vec![LLMMessageType::text(prompt)]).await?;
        let bytes = response_to_image_data(&response)?;

        let (output_path, size) = self
            .save_output(config, OutputKind::Generation, base_name, &bytes)
            .await?;
        Ok(format!(
            "Generated image saved: {} ({size} bytes)",
            output_path.display()
        ))
    }

    /// Edit the image at `image` (path or data URL) following `prompt` and
    /// save the result as the next free `_edit_NNN` under `<output>/edits`.
    pub async fn edit_image(
        &self,
        image: &str,
        prompt: &str,
        config: &ImageConfig,
        mode: Mode,
    ) -> Result<String> {
        let api_key = self.api_key(mode)?;
        let base_name = edit_base_name(image, config.custom_name.as_deref());

        if mode.is_mock() {
            let output_path = self
                .reserve_output_path(config, OutputKind::Edit, &base_name)
                .await?;
            return Ok(format!(
                "[TEST MODE] Would edit image: {} -> {} with prompt: \"{}...\"",
                describe_input(image),
                output_path.display(),
                preview(prompt)
            ));
        }

        let parsed = parse_image_input(image).await?;
        debug!(mime = %parsed.mime, encoded_len = parsed.base64.len(), "parsed edit input");

        let client = self.client(api_key, &self.settings.image_model);
        let parts = vec![
            LLMMessageType::text(prompt),
            LLMMessageType::image_b64(parsed.base64, parsed.mime),
        ];
        let response = send_generate_request(&client, parts).await?;
        let bytes = response_to_image_data(&response)?;

        let (output_path, size) = self
            .save_output(config, OutputKind::Edit, &base_name, &bytes)
            .await?;
        Ok(format!(
            "Edited image saved: {} ({size} bytes)",
            output_path.display()
        ))
    }
}
