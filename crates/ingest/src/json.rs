//! Transcript extraction from JSON exports

use meetbrief_common::{MeetbriefError, Result};
use serde_json::Value;

/// Key holding the transcript in exports that provide one directly
pub const TRANSCRIPT_KEY: &str = "transcript";

/// Extract transcript text from a JSON document
///
/// A top-level `transcript` string is returned as is. Otherwise every string
/// in the document is collected depth-first (object keys in document order)
/// and joined with newlines.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| MeetbriefError::malformed_input(format!("Invalid JSON document: {}", e)))?;

    if let Some(transcript) = value.get(TRANSCRIPT_KEY) {
        if let Value::String(text) = transcript {
            return Ok(text.clone());
        }
        return Ok(collect_strings(transcript).join("\n"));
    }

    Ok(collect_strings(&value).join("\n"))
}

/// Collect every string payload depth-first
pub fn collect_strings(value: &Value) -> Vec<&str> {
    let mut out = Vec::new();
    visit(value, &mut out);
    out
}

fn visit<'a>(value: &'a Value, out: &mut Vec<&'a str>) {
    match value {
        Value::String(s) => out.push(s),
        Value::Array(items) => items.iter().for_each(|item| visit(item, out)),
        Value::Object(map) => map.values().for_each(|item| visit(item, out)),
        Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}
