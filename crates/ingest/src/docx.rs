//! Paragraph text extraction from Word (.docx) documents

use meetbrief_common::{MeetbriefError, Result};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract body paragraphs joined by newlines
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|_| MeetbriefError::malformed_input("Invalid DOCX file."))?;

    let mut xml = String::new();
    let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
        MeetbriefError::malformed_input(format!("DOCX has no {}: {}", DOCUMENT_PART, e))
    })?;
    part.read_to_string(&mut xml)
        .map_err(|e| MeetbriefError::malformed_input(format!("Failed to read {}: {}", DOCUMENT_PART, e)))?;

    Ok(paragraphs(&xml)?.join("\n"))
}

/// Text of each paragraph that is a direct child of `w:body`
///
/// Paragraphs inside tables and text boxes are skipped. `w:tab` becomes a
/// tab and `w:br`/`w:cr` a newline.
pub fn paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut depth = 0usize;
    let mut body_child_depth: Option<usize> = None;
    let mut current: Option<String> = None;
    let mut nested = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| MeetbriefError::malformed_input(format!("Invalid DOCX XML: {}", e)))?;

        match event {
            Event::Start(e) => {
                depth += 1;
                match e.name().as_ref() {
                    b"w:body" => body_child_depth = Some(depth + 1),
                    b"w:p" => {
                        if current.is_some() {
                            nested += 1;
                        } else if Some(depth) == body_child_depth {
                            current = Some(String::new());
                        }
                    }
                    b"w:t" => in_text = true,
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let open = current.is_some();
                let ch = match e.name().as_ref() {
                    b"w:p" if !open && Some(depth + 1) == body_child_depth => {
                        paragraphs.push(String::new());
                        None
                    }
                    b"w:tab" => Some('\t'),
                    b"w:br" | b"w:cr" => Some('\n'),
                    _ => None,
                };
                if let (Some(ch), Some(text), 0) = (ch, current.as_mut(), nested) {
                    text.push(ch);
                }
            }
            Event::Text(t) if in_text && nested == 0 => {
                if let Some(text) = current.as_mut() {
                    let unescaped = t.unescape().map_err(|e| {
                        MeetbriefError::malformed_input(format!("Invalid DOCX text: {}", e))
                    })?;
                    text.push_str(&unescaped);
                }
            }
            Event::End(e) => {
                match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" => {
                        if nested > 0 {
                            nested -= 1;
                        } else if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if body_child_depth.is_none() {
        return Err(MeetbriefError::malformed_input("DOCX document has no body"));
    }

    Ok(paragraphs)
}
