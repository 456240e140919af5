//! Rendering module for reading blocks files and writing outlines.

mod json;
mod text;

pub use json::{collect_inputs, read_document, to_json, write_outline, JsonFormat};
pub use text::to_text;
