use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{LLMError, Result};
use crate::types::{LLMClient, LLMMessageType};
use crate::utils::decode_base64;

use super::models::{GeminiResponse, InlineData};

pub fn convert_body_parts_gemini(body_part: Vec<LLMMessageType>) -> Vec<Value> {
    body_part
        .into_iter()
        .map(|part| match part {
            LLMMessageType::TEXT(text) => json!({ "text": text }),
            LLMMessageType::IMAGE {
                data_b64,
                mime_type,
            } => json!({
                "inlineData": {
                    "mimeType": mime_type,
                    "data": data_b64
                }
            }),
        })
        .collect()
}

/// Single-turn `generateContent` body: one content entry holding every part.
pub fn build_generate_body(body_part: Vec<LLMMessageType>) -> Value {
    json!({
        "contents": [{
            "parts": convert_body_parts_gemini(body_part)
        }]
    })
}

pub async fn send_generate_request(
    api_client: &LLMClient,
    body_part: Vec<LLMMessageType>,
) -> Result<GeminiResponse> {
    let url = api_client.generate_content_url();
    let body = build_generate_body(body_part);

    debug!(%url, model = api_client.default_model(), "sending generateContent request");

    let client = Client::new();
    let response = client
        .post(&url)
        .header("x-goog-api-key", api_client.api_key())
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    let response_text = response.text().await?;

    if !status.is_success() {
        return Err(LLMError::Api {
            status: status.as_u16(),
            body: response_text,
        });
    }

    serde_json::from_str(&response_text).map_err(|source| LLMError::Decode {
        source,
        raw: response_text,
    })
}

/// First part of the first candidate carrying non-empty inline data.
pub fn first_inline_image(response: &GeminiResponse) -> Result<&InlineData> {
    let candidate = response.candidates.first().ok_or(LLMError::NoCandidates)?;
    let parts = candidate
        .content
        .as_ref()
        .map(|content| content.parts.as_slice())
        .unwrap_or_default();
    if parts.is_empty() {
        return Err(LLMError::NoParts);
    }

    parts
        .iter()
        .filter_map(|part| part.inline_data.as_ref())
        .find(|inline_data| !inline_data.data.trim().is_empty())
        .ok_or(LLMError::NoImage)
}

pub fn decode_inline_data(inline_data: &InlineData) -> Result<Vec<u8>> {
    Ok(decode_base64(&inline_data.data)?)
}

pub fn response_to_image_data(response: &GeminiResponse) -> Result<Vec<u8>> {
    decode_inline_data(first_inline_image(response)?)
}

/// Text of the first part of the first candidate.
pub fn response_to_text_data(response: &GeminiResponse) -> Result<String> {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone())
        .filter(|text| !text.is_empty())
        .ok_or(LLMError::NoText)
}
