use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// All AL object kinds, including extension variants
///
/// The wire spelling is the lowercased tag (`table`, `tableextension`, ...),
/// fixed independently of the in-memory representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlObjectType {
    Table,
    TableExtension,
    Page,
    PageExtension,
    PageCustomization,
    Codeunit,
    Report,
    ReportExtension,
    Query,
    Xmlport,
    Enum,
    EnumExtension,
    Interface,
    PermissionSet,
    PermissionSetExtension,
    Profile,
    ControlAddin,
    Entitlement,
    Dotnet,
}

impl AlObjectType {
    /// The lowercase wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlObjectType::Table => "table",
            AlObjectType::TableExtension => "tableextension",
            AlObjectType::Page => "page",
            AlObjectType::PageExtension => "pageextension",
            AlObjectType::PageCustomization => "pagecustomization",
            AlObjectType::Codeunit => "codeunit",
            AlObjectType::Report => "report",
            AlObjectType::ReportExtension => "reportextension",
            AlObjectType::Query => "query",
            AlObjectType::Xmlport => "xmlport",
            AlObjectType::Enum => "enum",
            AlObjectType::EnumExtension => "enumextension",
            AlObjectType::Interface => "interface",
            AlObjectType::PermissionSet => "permissionset",
            AlObjectType::PermissionSetExtension => "permissionsetextension",
            AlObjectType::Profile => "profile",
            AlObjectType::ControlAddin => "controladdin",
            AlObjectType::Entitlement => "entitlement",
            AlObjectType::Dotnet => "dotnet",
        }
    }

    /// Match a source identifier against the object-kind keywords,
    /// case-insensitively.
    pub fn from_keyword(word: &str) -> Option<Self> {
        let lower = word.to_ascii_lowercase();
        match lower.as_str() {
            "table" => Some(AlObjectType::Table),
            "tableextension" => Some(AlObjectType::TableExtension),
            "page" => Some(AlObjectType::Page),
            "pageextension" => Some(AlObjectType::PageExtension),
            "pagecustomization" => Some(AlObjectType::PageCustomization),
            "codeunit" => Some(AlObjectType::Codeunit),
            "report" => Some(AlObjectType::Report),
            "reportextension" => Some(AlObjectType::ReportExtension),
            "query" => Some(AlObjectType::Query),
            "xmlport" => Some(AlObjectType::Xmlport),
            "enum" => Some(AlObjectType::Enum),
            "enumextension" => Some(AlObjectType::EnumExtension),
            "interface" => Some(AlObjectType::Interface),
            "permissionset" => Some(AlObjectType::PermissionSet),
            "permissionsetextension" => Some(AlObjectType::PermissionSetExtension),
            "profile" => Some(AlObjectType::Profile),
            "controladdin" => Some(AlObjectType::ControlAddin),
            "entitlement" => Some(AlObjectType::Entitlement),
            "dotnet" => Some(AlObjectType::Dotnet),
            _ => None,
        }
    }

    /// Whether the header grammar requires a numeric id for this kind.
    /// Interfaces are the only id-less kind.
    pub fn requires_id(&self) -> bool {
        !matches!(self, AlObjectType::Interface)
    }
}

/// Access modifier on a procedure declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessModifier {
    #[default]
    Public,
    Local,
    Internal,
    Protected,
}

impl AccessModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessModifier::Public => "public",
            AccessModifier::Local => "local",
            AccessModifier::Internal => "internal",
            AccessModifier::Protected => "protected",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("local") {
            Some(AccessModifier::Local)
        } else if word.eq_ignore_ascii_case("internal") {
            Some(AccessModifier::Internal)
        } else if word.eq_ignore_ascii_case("protected") {
            Some(AccessModifier::Protected)
        } else {
            None
        }
    }
}

/// Whether an executable member is a procedure or a platform trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcedureKind {
    Procedure,
    Trigger,
}

/// The granularity level of a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    WholeObject,
    Header,
    Section,
    Procedure,
    Trigger,
}

impl ChunkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkType::WholeObject => "whole_object",
            ChunkType::Header => "header",
            ChunkType::Section => "section",
            ChunkType::Procedure => "procedure",
            ChunkType::Trigger => "trigger",
        }
    }
}

/// A single property assignment (e.g. `Caption = 'Address';`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlProperty {
    pub name: String,
    /// Raw right-hand side, trimmed, without the terminating `;`
    pub value: String,
    pub line_start: usize,
    pub line_end: usize,
}

/// A named `{ ... }` region inside an object body (fields, layout, actions, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlSection {
    /// Section name, lowercased
    pub name: String,
    /// Verbatim text strictly between the section's outer braces
    pub body_text: String,
    pub line_start: usize,
    pub line_end: usize,
    /// Not populated by the parser; kept for callers that re-chunk sections
    #[serde(default)]
    pub children: Vec<AlSection>,
}

/// A procedure or trigger inside an AL object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlProcedure {
    pub kind: ProcedureKind,
    pub name: String,
    /// Defaults to `public`; triggers never carry a modifier
    #[serde(default)]
    pub access: AccessModifier,
    /// `[...]` attribute blocks preceding the declaration, verbatim, in source order
    #[serde(default)]
    pub attributes: Vec<String>,
    pub return_type: Option<String>,
    /// Declaration through the line containing the first `begin`
    /// (or through the terminator for bodyless declarations)
    pub signature_text: String,
    /// `begin` through the matching `end;`; empty for bodyless declarations
    pub body_text: String,
    pub line_start: usize,
    pub line_end: usize,
}

impl AlProcedure {
    pub fn is_trigger(&self) -> bool {
        self.kind == ProcedureKind::Trigger
    }
}

/// Parsed representation of a single top-level AL object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlObject {
    pub object_type: AlObjectType,
    /// Numeric id from the header; 0 for interfaces
    pub object_id: u32,
    pub object_name: String,
    pub extends: Option<String>,
    /// Interfaces named in an `implements` clause, in source order
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub properties: Vec<AlProperty>,
    #[serde(default)]
    pub sections: Vec<AlSection>,
    #[serde(default)]
    pub procedures: Vec<AlProcedure>,
    /// Full object text, header keyword through closing brace
    pub source_text: String,
    pub line_start: usize,
    pub line_end: usize,
    /// Fingerprint of the whole source file this object came from
    pub file_hash: String,
}

impl AlObject {
    /// Value of the first property whose name matches case-insensitively.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.value.as_str())
    }
}

/// Metadata attached to each chunk for filtering and context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChunkMetadata {
    /// Source file path, relative, absolute, or URL-style
    pub file_path: String,
    /// Kind of the originating object (lowercased wire tag)
    pub object_type: AlObjectType,
    /// Numeric object id (0 for interfaces)
    pub object_id: u32,
    pub object_name: String,
    pub chunk_type: ChunkType,
    /// Set only for section chunks
    pub section_name: Option<String>,
    /// Set only for procedure and trigger chunks
    pub procedure_name: Option<String>,
    /// Base object name for extension kinds
    pub extends: Option<String>,
    /// Copied from a `SourceTable` property on the object when present
    pub source_table: Option<String>,
    /// Attribute blocks when the chunk is a procedure/trigger, verbatim
    #[serde(default)]
    pub attributes: Vec<String>,
    /// 1-based, inclusive, relative to the original source
    pub line_start: usize,
    pub line_end: usize,
    /// 16-char lowercase hex BLAKE2b-8 fingerprint of the source file
    pub file_hash: String,
}

/// A single chunk of AL code ready for embedding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Chunk {
    pub content: String,
    /// `max(1, chars/4)` when estimation is enabled, else 0
    pub token_estimate: usize,
    pub metadata: ChunkMetadata,
}
