//! JSON and JSONL round-trip for chunks
//!
//! String-based and pure: callers decide where the bytes go. The schema is
//! the wire contract on [`Chunk`] / [`crate::ChunkMetadata`]; deserializing
//! what these functions produce yields structurally equal chunks.

use crate::error::ChunkerError;
use crate::types::Chunk;

/// Render chunks as a pretty-printed JSON array.
pub fn chunks_to_json(chunks: &[Chunk]) -> Result<String, ChunkerError> {
    Ok(serde_json::to_string_pretty(chunks)?)
}

/// Render chunks as newline-delimited JSON, one compact object per line,
/// with a trailing newline.
pub fn chunks_to_jsonl(chunks: &[Chunk]) -> Result<String, ChunkerError> {
    let mut out = String::new();
    for chunk in chunks {
        out.push_str(&serde_json::to_string(chunk)?);
        out.push('\n');
    }
    Ok(out)
}

/// Read chunks from a JSON array produced by [`chunks_to_json`].
pub fn chunks_from_json(text: &str) -> Result<Vec<Chunk>, ChunkerError> {
    Ok(serde_json::from_str(text)?)
}

/// Read chunks from JSONL produced by [`chunks_to_jsonl`]. Blank lines are
/// ignored.
pub fn chunks_from_jsonl(text: &str) -> Result<Vec<Chunk>, ChunkerError> {
    let mut chunks = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        chunks.push(serde_json::from_str(line)?);
    }
    Ok(chunks)
}
