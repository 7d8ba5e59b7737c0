use meetbrief_common::{MeetbriefError, Result};
use tracing::{debug, info};

use crate::kind::InputKind;
use crate::{docx, json};

/// Read an uploaded transcript document into plain text
///
/// # Arguments
/// * `content_type` - MIME type reported by the uploader, if any
/// * `filename` - original file name, used when the content type is generic
/// * `bytes` - raw file contents
pub fn read_document(
    content_type: Option<&str>,
    filename: Option<&str>,
    bytes: &[u8],
) -> Result<String> {
    let kind = InputKind::detect(content_type, filename)?;
    debug!(
        "Reading {} ({} bytes) as {:?}",
        filename.unwrap_or("upload"),
        bytes.len(),
        kind
    );

    let text = match kind {
        InputKind::PlainText => read_plain_text(bytes)?,
        InputKind::Json => json::extract_text(bytes)?,
        InputKind::Docx => docx::extract_text(bytes)?,
        InputKind::Pdf => read_pdf(bytes)?,
    };

    info!("Extracted {} chars from {:?} document", text.chars().count(), kind);
    Ok(text)
}

fn read_plain_text(bytes: &[u8]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| MeetbriefError::malformed_input(format!("Text file is not valid UTF-8: {}", e)))
}

fn read_pdf(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| MeetbriefError::malformed_input(format!("Invalid PDF file: {}", e)))
}
