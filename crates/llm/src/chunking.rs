/// Default chunk size in characters
///
/// Keeps a single prompt comfortably under the backend's input limit.
pub const DEFAULT_MAX_CHARS: usize = 15_000;

/// Text chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk text
    pub text: String,

    /// 1-based position of this chunk
    pub position: usize,

    /// Total number of chunks produced from the source text
    pub total: usize,

    /// Start byte offset in original text
    pub start: usize,

    /// End byte offset in original text (exclusive)
    pub end: usize,
}

impl TextChunk {
    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Split text into consecutive windows of at most `max_chars` characters
///
/// Windows never overlap and ignore word or sentence boundaries. Empty text
/// yields no chunks. A `max_chars` of zero is treated as 1.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<TextChunk> {
    let max_chars = max_chars.max(1);

    // Byte offset of every window start, plus the end of the text
    let mut bounds: Vec<usize> = text
        .char_indices()
        .step_by(max_chars)
        .map(|(idx, _)| idx)
        .collect();
    if bounds.is_empty() {
        return Vec::new();
    }
    bounds.push(text.len());

    let total = bounds.len() - 1;
    bounds
        .windows(2)
        .enumerate()
        .map(|(i, w)| TextChunk {
            text: text[w[0]..w[1]].to_string(),
            position: i + 1,
            total,
            start: w[0],
            end: w[1],
        })
        .collect()
}
