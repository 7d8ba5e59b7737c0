//! Input classification by content type and file extension

use meetbrief_common::{MeetbriefError, Result};
use std::path::Path;

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_JSON: &str = "application/json";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// Voice, audio and video extensions sent to transcription
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "aac", "avi", "flac", "m4a", "mkv", "mov", "mp3", "mp4", "mpeg", "mpga", "oga", "ogg",
    "opus", "wav", "webm",
];

/// Transcript document formats the readers understand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    PlainText,
    Json,
    Docx,
    Pdf,
}

impl InputKind {
    /// Classify a document
    ///
    /// The content type decides when it is specific; a missing or generic
    /// (`application/octet-stream`) content type falls back to the filename
    /// extension.
    pub fn detect(content_type: Option<&str>, filename: Option<&str>) -> Result<Self> {
        let mime = content_type.map(essence).filter(|m| !m.is_empty());

        match mime.as_deref() {
            Some(MIME_TEXT) => return Ok(Self::PlainText),
            Some(MIME_JSON) => return Ok(Self::Json),
            Some(MIME_DOCX) => return Ok(Self::Docx),
            Some(MIME_PDF) => return Ok(Self::Pdf),
            Some(MIME_OCTET_STREAM) | None => {}
            Some(other) => {
                return Err(MeetbriefError::unsupported_input(format!(
                    "Unsupported content type: {}",
                    other
                )))
            }
        }

        match extension(filename).as_deref() {
            Some("txt") => Ok(Self::PlainText),
            Some("json") => Ok(Self::Json),
            Some("docx") => Ok(Self::Docx),
            Some("pdf") => Ok(Self::Pdf),
            _ => Err(MeetbriefError::unsupported_input(format!(
                "Unsupported content type: {}",
                mime.as_deref().unwrap_or("unknown")
            ))),
        }
    }

    /// Canonical MIME type
    pub fn mime(&self) -> &'static str {
        match self {
            Self::PlainText => MIME_TEXT,
            Self::Json => MIME_JSON,
            Self::Docx => MIME_DOCX,
            Self::Pdf => MIME_PDF,
        }
    }
}

/// Check whether an upload is voice/audio/video rather than a document
pub fn is_media(content_type: Option<&str>, filename: Option<&str>) -> bool {
    if let Some(mime) = content_type.map(essence) {
        if mime.starts_with("audio/") || mime.starts_with("video/") {
            return true;
        }
        if mime != MIME_OCTET_STREAM && !mime.is_empty() {
            return false;
        }
    }

    extension(filename)
        .map(|ext| MEDIA_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Lowercased MIME type without parameters (`text/plain; charset=utf-8` -> `text/plain`)
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

fn extension(filename: Option<&str>) -> Option<String> {
    filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
