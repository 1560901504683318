#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode Gemini response JSON: {source}. Raw response: {raw}")]
    Decode {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("No candidates in response")]
    NoCandidates,

    #[error("No parts in response")]
    NoParts,

    #[error("No image data returned from model")]
    NoImage,

    #[error("No analysis returned")]
    NoText,

    #[error("Base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T, E = LLMError> = std::result::Result<T, E>;
