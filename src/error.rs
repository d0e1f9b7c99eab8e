/// Centralized error types for bc-al-chunker using thiserror
///
/// Parsing surfaces non-fatal, per-object diagnostics (see
/// [`crate::parser::ParseOutcome`]); these enums are the fatal side and the
/// diagnostic payload.
use thiserror::Error;

/// Main error type for the chunking pipeline
#[derive(Error, Debug)]
pub enum ChunkerError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Lexical and structural errors raised while scanning AL source
///
/// Every variant carries the 1-based line where the offending scan started,
/// so diagnostics can be reported against the original file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unterminated '{{' block opened at line {line}")]
    UnterminatedBlock { line: usize },

    #[error("statement at line {line} has no terminating ';'")]
    UnterminatedStatement { line: usize },

    #[error("unterminated string or quoted identifier at line {line}")]
    UnterminatedString { line: usize },

    #[error("block comment opened at line {line} is never closed")]
    UnterminatedComment { line: usize },

    #[error("malformed {kind} header at line {line}: {reason}")]
    MalformedHeader {
        kind: String,
        line: usize,
        reason: String,
    },
}

impl ParseError {
    /// The 1-based source line the error is anchored to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnterminatedBlock { line }
            | ParseError::UnterminatedStatement { line }
            | ParseError::UnterminatedString { line }
            | ParseError::UnterminatedComment { line }
            | ParseError::MalformedHeader { line, .. } => *line,
        }
    }
}

/// Errors related to chunking configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}
