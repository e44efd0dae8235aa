//! Fixed-window text splitter with overlap.
//!
//! Splits ingested text into overlapping character windows, the unit of
//! embedding and vector search. Operates on characters, not bytes, so
//! multi-byte input never splits inside a code point.

/// Splits `text` into chunks of at most `chunk_size` characters, with
/// consecutive chunks sharing `overlap` characters.
///
/// Whitespace-only chunks are dropped. An overlap at or above the chunk
/// size is clamped so the window always advances.
pub fn split_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    if chunk_size == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }

    let step = chunk_size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        let chunk: String = chars[start..end].iter().collect();
        if !chunk.trim().is_empty() {
            chunks.push(chunk);
        }
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}
