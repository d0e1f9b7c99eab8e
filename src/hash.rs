//! Content fingerprinting for AL source files
//!
//! BLAKE2b with an 8-byte digest over the BOM-normalized UTF-8 bytes. The
//! 16-character hex string is compact and sufficient for file-change
//! detection across thousands of files, and the fixed algorithm keeps
//! fingerprints identical across implementations.

use blake2::digest::consts::U8;
use blake2::{Blake2b, Digest};

type Blake2b64 = Blake2b<U8>;

/// Compute the content hash of AL source text.
///
/// A leading U+FEFF BOM is stripped first, so two files differing only by
/// BOM hash equal.
pub fn hash_source(source: &str) -> String {
    let text = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut hasher = Blake2b64::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
