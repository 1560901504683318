mod api;
pub mod models;

pub use api::{
    build_generate_body, convert_body_parts_gemini, decode_inline_data, first_inline_image,
    response_to_image_data, response_to_text_data, send_generate_request,
};
