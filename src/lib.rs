//! # bc-al-chunker - Structure-Aware RAG Chunking for Business Central AL
//!
//! A pure Rust library that turns Business Central AL source files into
//! semantically-aware text chunks suitable for embedding into a vector index
//! for retrieval-augmented generation.
//!
//! ## Overview
//!
//! AL has no readily available grammar, so the parser recovers an
//! object-level tree by lexical-aware scanning: brace matching and keyword
//! probing that correctly tolerate AL's string literals (`''` doubling),
//! `//` and `/* */` comments, and `"quoted identifiers"`. A hierarchical
//! chunker then splits each object at natural declarative boundaries under a
//! size budget, so a chunk is always a whole object, a header, a section, a
//! procedure, or a trigger - never a cut mid-declaration.
//!
//! ## Key Features
//!
//! - **Grammar-free parsing**: all 19 AL object kinds (tables, pages,
//!   codeunits, reports, queries, enums, interfaces, permission sets, and
//!   their extensions), with properties, sections, procedures, triggers,
//!   attributes, and access modifiers
//! - **Hierarchical chunking**: whole-object fast path, header synthesis,
//!   per-section chunks with greedy sub-block grouping for oversized
//!   sections, one chunk per procedure/trigger
//! - **Self-contained chunks**: a two-line context header on every sub-object
//!   chunk identifies the originating object and file
//! - **Stable fingerprints**: 16-hex-char BLAKE2b-8 hash of the
//!   BOM-normalized source, shared by all chunks of a file
//! - **Non-fatal diagnostics**: malformed objects are skipped and recorded;
//!   the rest of the file still parses
//! - **Pure functions**: no I/O, no shared state; safe to call from any
//!   number of threads
//!
//! ## Usage Example
//!
//! ```rust
//! use bc_al_chunker::{chunk_file, ChunkingConfig, ChunkType};
//!
//! let source = r#"
//! enum 50100 "Customer Loyalty"
//! {
//!     Extensible = true;
//!
//!     value(0; None) { Caption = 'None'; }
//!     value(1; Gold) { Caption = 'Gold'; }
//! }
//! "#;
//!
//! let chunks = chunk_file(source, "CustomerLoyalty.Enum.al", &ChunkingConfig::default());
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].metadata.chunk_type, ChunkType::WholeObject);
//! assert_eq!(chunks[0].metadata.object_name, "Customer Loyalty");
//! ```
//!
//! Parsing and chunking can also be driven separately:
//!
//! ```rust
//! use bc_al_chunker::{parse_source, chunk_object, ChunkingConfig};
//!
//! let source = "table 50100 \"Customer Address\" { Caption = 'Customer Address'; }";
//! let outcome = parse_source(source, "Tab50100.al");
//! assert!(outcome.diagnostics.is_empty());
//!
//! let config = ChunkingConfig { max_chunk_chars: 2000, ..Default::default() };
//! for object in &outcome.objects {
//!     let chunks = chunk_object(object, "Tab50100.al", &config);
//!     assert!(!chunks.is_empty());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`parser`]: header recognition, body classification, and the lexical
//!   scanner primitives everything routes through
//! - [`chunker`]: the hierarchical chunking engine
//! - [`hash`]: BLAKE2b-8 content fingerprinting
//! - [`serializers`]: JSON / JSONL string round-trip for chunks
//! - [`config`]: chunking configuration
//! - [`types`]: the parse tree and chunk data model
//! - [`error`]: error types and diagnostics

/// Hierarchical chunking engine
pub mod chunker;

/// Chunking configuration
pub mod config;

/// Error types and diagnostics
pub mod error;

/// Content fingerprinting (BLAKE2b-8)
pub mod hash;

/// AL parsing: header recognition, body classification, lexical scanning
pub mod parser;

/// JSON / JSONL serialization for chunks
pub mod serializers;

/// Parse tree and chunk data model
pub mod types;

// Re-export the public entry points and commonly used types for convenience
pub use chunker::{chunk_file, chunk_object};
pub use config::ChunkingConfig;
pub use error::{ChunkerError, ConfigError, ParseError};
pub use hash::hash_source;
pub use parser::{parse_source, ParseOutcome};
pub use serializers::{chunks_from_json, chunks_from_jsonl, chunks_to_json, chunks_to_jsonl};
pub use types::{
    AccessModifier, AlObject, AlObjectType, AlProcedure, AlProperty, AlSection, Chunk,
    ChunkMetadata, ChunkType, ProcedureKind,
};
