pub mod gemini;

pub use gemini::{response_to_image_data, response_to_text_data, send_generate_request};
