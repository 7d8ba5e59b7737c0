//! Meetbrief Input Readers
//!
//! Classifies uploaded transcripts and extracts their text

pub mod docx;
pub mod json;
pub mod kind;
pub mod reader;

// Re-export main types
pub use kind::{is_media, InputKind, MEDIA_EXTENSIONS};
pub use reader::read_document;
