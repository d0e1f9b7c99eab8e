/// Chunking configuration
///
/// Passed by value per call; the library never reads configuration from the
/// environment or from disk.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Controls how AL objects are split into chunks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum characters per chunk. Objects at or under this size are kept
    /// whole; larger objects are split at declarative boundaries.
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Advisory lower bound for callers that post-process chunks. The core
    /// never drops or merges chunks by it.
    #[serde(default = "default_min_chunk_chars")]
    pub min_chunk_chars: usize,

    /// Prepend a two-line context comment to every non-whole chunk so each
    /// chunk is self-contained for the embedding model.
    #[serde(default = "default_include_context_header")]
    pub include_context_header: bool,

    /// Compute the chars/4 token estimate on each chunk.
    #[serde(default = "default_estimate_tokens")]
    pub estimate_tokens: bool,
}

fn default_max_chunk_chars() -> usize {
    1500
}

fn default_min_chunk_chars() -> usize {
    100
}

fn default_include_context_header() -> bool {
    true
}

fn default_estimate_tokens() -> bool {
    true
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
            min_chunk_chars: default_min_chunk_chars(),
            include_context_header: default_include_context_header(),
            estimate_tokens: default_estimate_tokens(),
        }
    }
}

impl ChunkingConfig {
    /// Validate configuration values
    ///
    /// Opt-in for callers; the chunker itself tolerates any configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chunk_chars == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_chunk_chars".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.min_chunk_chars > self.max_chunk_chars {
            return Err(ConfigError::InvalidValue {
                key: "min_chunk_chars".to_string(),
                reason: format!(
                    "must not exceed max_chunk_chars ({}), got {}",
                    self.max_chunk_chars, self.min_chunk_chars
                ),
            });
        }

        Ok(())
    }
}
