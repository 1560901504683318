use llmapi::{response_to_text_data, send_generate_request, LLMMessageType};

use crate::constants::MOCK_ANALYSIS;
use crate::error::Result;
use crate::fs_utils::{describe_input, parse_image_input};
use crate::models::Mode;
use crate::toolkit::{preview, ImageToolkit};

impl ImageToolkit {
    /// Ask the analysis model `question` about `image` and return its answer.
    pub async fn analyze_image(&self, image: &str, question: &str, mode: Mode) -> Result<String> {
        let api_key = self.api_key(mode)?;

        if mode.is_mock() {
            return Ok(format!(
                "[TEST MODE] Would analyze image: {} with question: \"{}...\" - Mock analysis: {MOCK_ANALYSIS}",
                describe_input(image),
                preview(question)
            ));
        }

        let parsed = parse_image_input(image).await?;
        let client = self.client(api_key, &self.settings.analysis_model);
        let parts = vec![
            LLMMessageType::text(question),
            LLMMessageType::image_b64(parsed.base64, parsed.mime),
        ];
        let response = send_generate_request(&client, parts).await?;
        Ok(response_to_text_data(&response)?)
    }
}
