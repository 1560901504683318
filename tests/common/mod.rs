#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use serde_json::{json, Value};

use image_toolkit_lib::{GeminiSettings, ImageToolkit, StaticCredentials};

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDRfake-image-body";

/// A request received by the fake Gemini server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub body: Value,
}

/// In-process stand-in for the Gemini API that answers every request with
/// the same status and body and records what it was sent.
pub struct FakeGemini {
    pub endpoint: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeGemini {
    pub async fn start(status: u16, response_body: String) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let sink = requests.clone();
        let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: String| {
            let sink = sink.clone();
            let response_body = response_body.clone();
            async move {
                sink.lock().unwrap().push(RecordedRequest {
                    path: uri.path().to_string(),
                    api_key: headers
                        .get("x-goog-api-key")
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_string),
                    body: serde_json::from_str(&body).unwrap_or(Value::Null),
                });
                (StatusCode::from_u16(status).unwrap(), response_body)
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            endpoint: format!("http://{addr}/v1beta/models"),
            requests,
        }
    }

    /// Answers with one candidate holding a text part and `PNG_BYTES` inline.
    pub async fn returning_image() -> Self {
        let body = json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here you go" },
                    { "inlineData": { "mimeType": "image/png", "data": BASE64_ENGINE.encode(PNG_BYTES) } }
                ]}
            }]
        });
        Self::start(200, body.to_string()).await
    }

    pub async fn returning_text(text: &str) -> Self {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        });
        Self::start(200, body.to_string()).await
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn toolkit_for(endpoint: &str, assets_root: &Path) -> ImageToolkit {
    let settings = GeminiSettings {
        endpoint: endpoint.to_string(),
        ..GeminiSettings::default()
    };
    let credentials = StaticCredentials::new().with_key("GEMINI_API_KEY", "test-key");
    ImageToolkit::new(settings, assets_root, Arc::new(credentials))
}

/// Toolkit whose endpoint refuses connections; only usable in mock mode
/// or for failures that happen before the request.
pub fn offline_toolkit(assets_root: &Path) -> ImageToolkit {
    toolkit_for("http://127.0.0.1:9/v1beta/models", assets_root)
}
