/// One part of a multimodal request: plain text or inline base64 image data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LLMMessageType {
    TEXT(String),
    IMAGE { data_b64: String, mime_type: String },
}

impl LLMMessageType {
    pub fn text(text: impl Into<String>) -> Self {
        LLMMessageType::TEXT(text.into())
    }

    pub fn image_b64(data_b64: impl Into<String>, mime_type: impl Into<String>) -> Self {
        LLMMessageType::IMAGE {
            data_b64: data_b64.into(),
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LLMClient {
    pub(crate) api_key: String,
    pub(crate) endpoint: String,
    pub(crate) default_model: String,
}

impl LLMClient {
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            default_model: default_model.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Full `generateContent` URL for the client's model. A leading
    /// `models/` on the model id is tolerated.
    pub fn generate_content_url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        let model = self
            .default_model
            .strip_prefix("models/")
            .unwrap_or(&self.default_model);
        format!("{endpoint}/{model}:generateContent")
    }
}
