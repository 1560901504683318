pub mod error;
pub mod providers;
pub mod types;
pub mod utils;

pub use error::LLMError;
pub use providers::{response_to_image_data, response_to_text_data, send_generate_request};
pub use types::{LLMClient, LLMMessageType};
