//! Hierarchical chunking engine
//!
//! Converts parsed [`AlObject`] trees into embedding-ready chunks:
//!
//! 1. Small objects (at or under `max_chunk_chars`) become one
//!    `whole_object` chunk.
//! 2. Large objects split at declarative boundaries: a header chunk
//!    (declaration + top-level properties), one chunk per structural
//!    section (sections over the limit split at their child blocks, grouped
//!    greedily up to the limit), and one chunk per procedure/trigger.
//! 3. Every sub-object chunk gets a synthetic two-line context header so it
//!    is self-contained for the embedding model.

use crate::config::ChunkingConfig;
use crate::parser::lexer;
use crate::parser::parse_source;
use crate::types::{
    AlObject, AlObjectType, AlProcedure, AlSection, Chunk, ChunkMetadata, ChunkType,
};

/// Cheap token estimate: roughly 1 token per 4 characters.
fn estimate_tokens(text: &str) -> usize {
    (text.chars().count() / 4).max(1)
}

/// The two comment lines (plus separating blank line) prepended to every
/// non-whole chunk. The id is omitted for interfaces; the name is always
/// double-quoted regardless of its source form.
fn build_context_header(obj: &AlObject, file_path: &str) -> String {
    if obj.object_type == AlObjectType::Interface {
        format!(
            "// Object: interface \"{}\"\n// File: {}\n\n",
            obj.object_name, file_path
        )
    } else {
        format!(
            "// Object: {} {} \"{}\"\n// File: {}\n\n",
            obj.object_type.as_str(),
            obj.object_id,
            obj.object_name,
            file_path
        )
    }
}

/// `SourceTable` property value with surrounding quotes removed.
fn source_table(obj: &AlObject) -> Option<String> {
    obj.property("SourceTable").map(|value| {
        value
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string()
    })
}

/// Line-addressable view over an object's `source_text`, indexed by the
/// absolute (file-relative) 1-based line numbers the tree carries.
struct LineIndex<'a> {
    src: &'a str,
    starts: Vec<usize>,
    first_line: usize,
}

impl<'a> LineIndex<'a> {
    fn new(src: &'a str, first_line: usize) -> Self {
        let mut starts = vec![0];
        for (i, b) in src.bytes().enumerate() {
            if b == b'\n' && i + 1 < src.len() {
                starts.push(i + 1);
            }
        }
        Self {
            src,
            starts,
            first_line,
        }
    }

    fn line_count(&self) -> usize {
        self.starts.len()
    }

    fn last_line(&self) -> usize {
        self.first_line + self.starts.len() - 1
    }

    /// Lines `abs_start..=abs_end` without the final line terminator.
    /// Out-of-range bounds are clamped.
    fn slice(&self, abs_start: usize, abs_end: usize) -> &'a str {
        let a = abs_start.max(self.first_line) - self.first_line;
        let b = abs_end.min(self.last_line()) - self.first_line;
        if a >= self.starts.len() || b < a {
            return "";
        }
        let start = self.starts[a];
        let mut end = if b + 1 < self.starts.len() {
            self.starts[b + 1]
        } else {
            self.src.len()
        };
        let bytes = self.src.as_bytes();
        if end > start && bytes[end - 1] == b'\n' {
            end -= 1;
        }
        if end > start && bytes[end - 1] == b'\r' {
            end -= 1;
        }
        &self.src[start..end]
    }

    fn line(&self, abs: usize) -> &'a str {
        self.slice(abs, abs)
    }
}

struct ChunkBuilder<'a> {
    obj: &'a AlObject,
    file_path: &'a str,
    config: &'a ChunkingConfig,
    context: Option<String>,
}

impl ChunkBuilder<'_> {
    /// Assemble a chunk, applying the context prefix and the empty-result
    /// policy (whitespace-only content is discarded).
    fn build(
        &self,
        body: &str,
        chunk_type: ChunkType,
        line_start: usize,
        line_end: usize,
        section_name: Option<&str>,
        procedure: Option<&AlProcedure>,
    ) -> Option<Chunk> {
        if body.trim().is_empty() {
            return None;
        }
        let content = match (&self.context, chunk_type) {
            (_, ChunkType::WholeObject) | (None, _) => body.to_string(),
            (Some(ctx), _) => format!("{ctx}{body}"),
        };
        let token_estimate = if self.config.estimate_tokens {
            estimate_tokens(&content)
        } else {
            0
        };
        Some(Chunk {
            content,
            token_estimate,
            metadata: ChunkMetadata {
                file_path: self.file_path.to_string(),
                object_type: self.obj.object_type,
                object_id: self.obj.object_id,
                object_name: self.obj.object_name.clone(),
                chunk_type,
                section_name: section_name.map(str::to_string),
                procedure_name: procedure.map(|p| p.name.clone()),
                extends: self.obj.extends.clone(),
                source_table: source_table(self.obj),
                attributes: procedure.map(|p| p.attributes.clone()).unwrap_or_default(),
                line_start,
                line_end,
                file_hash: self.obj.file_hash.clone(),
            },
        })
    }
}

/// Chunk a single parsed object.
///
/// Never fails: an object whose `source_text` is shorter than its declared
/// line range (a caller bug) degrades to a single `whole_object` chunk.
pub fn chunk_object(obj: &AlObject, file_path: &str, config: &ChunkingConfig) -> Vec<Chunk> {
    let index = LineIndex::new(&obj.source_text, obj.line_start);
    let declared_lines = obj.line_end.saturating_sub(obj.line_start) + 1;
    let degraded = index.line_count() < declared_lines;

    let builder = ChunkBuilder {
        obj,
        file_path,
        config,
        context: config
            .include_context_header
            .then(|| build_context_header(obj, file_path)),
    };

    if degraded || obj.source_text.chars().count() <= config.max_chunk_chars {
        return builder
            .build(
                &obj.source_text,
                ChunkType::WholeObject,
                obj.line_start,
                obj.line_end,
                None,
                None,
            )
            .into_iter()
            .collect();
    }

    let mut chunks = Vec::new();

    if let Some(chunk) = header_chunk(&builder, &index) {
        chunks.push(chunk);
    }

    for sec in &obj.sections {
        section_chunks(&builder, &index, sec, &mut chunks);
    }

    for proc in &obj.procedures {
        let chunk_type = if proc.is_trigger() {
            ChunkType::Trigger
        } else {
            ChunkType::Procedure
        };
        let body = index.slice(proc.line_start, proc.line_end);
        if let Some(chunk) = builder.build(
            body,
            chunk_type,
            proc.line_start,
            proc.line_end,
            None,
            Some(proc),
        ) {
            chunks.push(chunk);
        }
    }

    tracing::debug!(
        object = %obj.object_name,
        count = chunks.len(),
        "chunked object"
    );
    chunks
}

/// Chunk every object parsed from `text`, in source order.
pub fn chunk_file(text: &str, file_path: &str, config: &ChunkingConfig) -> Vec<Chunk> {
    let outcome = parse_source(text, file_path);
    outcome
        .objects
        .iter()
        .flat_map(|obj| chunk_object(obj, file_path, config))
        .collect()
}

/// Declaration lines through the opening `{`, followed by the lines of each
/// top-level property. The range runs from the declaration line through the
/// last retained property line (the brace line when there are none).
fn header_chunk(builder: &ChunkBuilder<'_>, index: &LineIndex<'_>) -> Option<Chunk> {
    let obj = builder.obj;
    let open_line = opening_brace_line(obj)?;
    let mut parts = vec![index.slice(obj.line_start, open_line)];
    let mut last_line = open_line;
    for prop in &obj.properties {
        parts.push(index.slice(prop.line_start, prop.line_end));
        last_line = prop.line_end;
    }
    builder.build(
        &parts.join("\n"),
        ChunkType::Header,
        obj.line_start,
        last_line,
        None,
        None,
    )
}

/// Absolute line of the object's opening brace, found under the lexical
/// skip rules (a `{` inside the quoted object name is not structure).
fn opening_brace_line(obj: &AlObject) -> Option<usize> {
    let src = &obj.source_text;
    let bytes = src.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match lexer::skip_opaque(src, i) {
            Ok(Some(next)) => {
                i = next;
                continue;
            }
            Ok(None) => {}
            Err(_) => return None,
        }
        if bytes[i] == b'{' {
            return Some(obj.line_start + lexer::line_number(src, i) - 1);
        }
        i += 1;
    }
    None
}

/// Emit chunks for one section: whole when it fits, otherwise split at its
/// child blocks with greedy grouping up to the budget.
fn section_chunks(
    builder: &ChunkBuilder<'_>,
    index: &LineIndex<'_>,
    sec: &AlSection,
    chunks: &mut Vec<Chunk>,
) {
    let full_text = index.slice(sec.line_start, sec.line_end);
    let budget = builder.config.max_chunk_chars;

    if full_text.chars().count() <= budget {
        if let Some(chunk) = builder.build(
            full_text,
            ChunkType::Section,
            sec.line_start,
            sec.line_end,
            Some(&sec.name),
            None,
        ) {
            chunks.push(chunk);
        }
        return;
    }

    let blocks = find_sub_blocks(full_text);
    if blocks.len() <= 1 {
        // Oversize allowed rather than cutting mid-declaration.
        tracing::debug!(section = %sec.name, "emitting oversize section chunk");
        if let Some(chunk) = builder.build(
            full_text,
            ChunkType::Section,
            sec.line_start,
            sec.line_end,
            Some(&sec.name),
            None,
        ) {
            chunks.push(chunk);
        }
        return;
    }

    // Absolute line ranges; the first group reaches back to the section's
    // first line so the name and opening brace are covered.
    let mut group_start = sec.line_start;
    let mut group_end: Option<usize> = None;
    for (_, rel_end) in blocks {
        let block_end = sec.line_start + rel_end;
        match group_end {
            None => group_end = Some(block_end),
            Some(prev_end) => {
                let candidate = index.slice(group_start, block_end);
                if candidate.chars().count() > budget {
                    if let Some(chunk) = builder.build(
                        index.slice(group_start, prev_end),
                        ChunkType::Section,
                        group_start,
                        prev_end,
                        Some(&sec.name),
                        None,
                    ) {
                        chunks.push(chunk);
                    }
                    group_start = prev_end + 1;
                }
                group_end = Some(block_end);
            }
        }
    }

    if let Some(prev_end) = group_end {
        // Extend through trailing section lines that carry content, then
        // trim whitespace-only and bare closing-brace lines.
        let mut end = sec.line_end;
        while end > prev_end {
            let t = index.line(end).trim();
            if t.is_empty() || t == "}" {
                end -= 1;
            } else {
                break;
            }
        }
        if let Some(chunk) = builder.build(
            index.slice(group_start, end.max(prev_end)),
            ChunkType::Section,
            group_start,
            end.max(prev_end),
            Some(&sec.name),
            None,
        ) {
            chunks.push(chunk);
        }
    }
}

/// Locate named child blocks (`field(...) { }`, `group(...) { }`,
/// `action(...) { }`, `dataitem(...) { }`, ...) at depth 1 of a section's
/// full text. Returns 0-based (start_line, end_line) offsets relative to the
/// section's first line.
fn find_sub_blocks(full_text: &str) -> Vec<(usize, usize)> {
    let bytes = full_text.as_bytes();
    let mut blocks = Vec::new();

    // Skip to the section's own opening brace first.
    let mut i = 0;
    let mut open = None;
    while i < bytes.len() {
        match lexer::skip_opaque(full_text, i) {
            Ok(Some(next)) => {
                i = next;
                continue;
            }
            Ok(None) => {}
            Err(_) => return blocks,
        }
        if bytes[i] == b'{' {
            open = Some(i);
            break;
        }
        i += 1;
    }
    let Some(open) = open else {
        return blocks;
    };
    let Ok((_, close)) = lexer::find_brace_block(full_text, open) else {
        return blocks;
    };

    let mut i = open + 1;
    while i < close {
        i = match lexer::skip_whitespace_and_comments(full_text, i) {
            Ok(next) => next,
            Err(_) => break,
        };
        if i >= close {
            break;
        }
        match lexer::skip_opaque(full_text, i) {
            Ok(Some(next)) => {
                i = next;
                continue;
            }
            Ok(None) => {}
            Err(_) => break,
        }
        let Some((_, word_end)) = lexer::read_identifier(full_text, i) else {
            i += 1;
            continue;
        };
        let block_start = i;
        let mut j = match lexer::skip_whitespace_and_comments(full_text, word_end) {
            Ok(next) => next,
            Err(_) => break,
        };
        if j < close && bytes[j] == b'(' {
            let Ok(paren_close) = lexer::find_paren_close(full_text, j) else {
                break;
            };
            j = match lexer::skip_whitespace_and_comments(full_text, paren_close + 1) {
                Ok(next) => next,
                Err(_) => break,
            };
        }
        if j < close && bytes[j] == b'{' {
            let Ok((_, block_close)) = lexer::find_brace_block(full_text, j) else {
                break;
            };
            blocks.push((
                lexer::line_number(full_text, block_start) - 1,
                lexer::line_number(full_text, block_close) - 1,
            ));
            i = block_close + 1;
        } else {
            i = word_end;
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(src: &str) -> AlObject {
        let outcome = parse_source(src, "test.al");
        assert!(
            outcome.diagnostics.is_empty(),
            "unexpected diagnostics: {:?}",
            outcome.diagnostics
        );
        assert_eq!(outcome.objects.len(), 1);
        outcome.objects.into_iter().next().unwrap()
    }

    fn small_enum() -> &'static str {
        "enum 50100 \"Customer Loyalty\"\n{\n    Extensible = true;\n\n    value(0; None) { Caption = 'None'; }\n    value(1; Bronze) { Caption = 'Bronze'; }\n    value(2; Silver) { Caption = 'Silver'; }\n    value(3; Gold) { Caption = 'Gold'; }\n}"
    }

    fn triggered_table() -> &'static str {
        concat!(
            "table 50100 \"Customer Address\"\n",
            "{\n",
            "    Caption = 'Customer Address';\n",
            "    DataPerCompany = true;\n",
            "\n",
            "    fields\n",
            "    {\n",
            "        field(1; \"Customer No.\"; Code[20]) { Caption = 'Customer No.'; }\n",
            "        field(2; \"Address Line 1\"; Text[100]) { Caption = 'Address Line 1'; }\n",
            "        field(3; City; Text[30]) { Caption = 'City'; }\n",
            "    }\n",
            "\n",
            "    keys\n",
            "    {\n",
            "        key(PK; \"Customer No.\") { Clustered = true; }\n",
            "    }\n",
            "\n",
            "    trigger OnInsert()\n",
            "    begin\n",
            "        TestField(\"Customer No.\");\n",
            "    end;\n",
            "\n",
            "    trigger OnModify()\n",
            "    begin\n",
            "        ValidateCity(City);\n",
            "    end;\n",
            "\n",
            "    local procedure ValidateCity(Value: Text[30])\n",
            "    begin\n",
            "        if Value = '' then\n",
            "            Error('City must not be empty.');\n",
            "    end;\n",
            "}"
        )
    }

    #[test]
    fn test_small_object_stays_whole() {
        let obj = parse_one(small_enum());
        let chunks = chunk_object(&obj, "simple_enum.al", &ChunkingConfig::default());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].metadata.chunk_type, ChunkType::WholeObject);
        assert_eq!(chunks[0].content, obj.source_text);
        assert_eq!(chunks[0].metadata.line_start, obj.line_start);
        assert_eq!(chunks[0].metadata.line_end, obj.line_end);
        assert!(!chunks[0].content.starts_with("// Object:"));
    }

    #[test]
    fn test_size_gate_boundary() {
        let obj = parse_one(small_enum());
        let len = obj.source_text.chars().count();

        let at_limit = ChunkingConfig {
            max_chunk_chars: len,
            ..Default::default()
        };
        assert_eq!(chunk_object(&obj, "e.al", &at_limit).len(), 1);

        let below_limit = ChunkingConfig {
            max_chunk_chars: len - 1,
            ..Default::default()
        };
        let chunks = chunk_object(&obj, "e.al", &below_limit);
        assert!(chunks.len() > 1);
        assert_eq!(chunks[0].metadata.chunk_type, ChunkType::Header);
    }

    #[test]
    fn test_table_splits_into_expected_chunks() {
        let obj = parse_one(triggered_table());
        let config = ChunkingConfig {
            max_chunk_chars: 400,
            ..Default::default()
        };
        let chunks = chunk_object(&obj, "table_with_triggers.al", &config);

        assert_eq!(chunks[0].metadata.chunk_type, ChunkType::Header);
        assert!(chunks[0].content.contains("Caption = 'Customer Address';"));
        assert!(chunks[0].content.contains("DataPerCompany = true;"));
        assert!(!chunks[0].content.contains("field(1"));
        assert!(!chunks[0].content.contains("trigger"));

        let sections: Vec<_> = chunks
            .iter()
            .filter(|c| c.metadata.chunk_type == ChunkType::Section)
            .collect();
        assert!(sections.iter().any(|c| c.metadata.section_name.as_deref() == Some("fields")));
        assert!(sections.iter().any(|c| c.metadata.section_name.as_deref() == Some("keys")));

        let triggers: Vec<_> = chunks
            .iter()
            .filter(|c| c.metadata.chunk_type == ChunkType::Trigger)
            .collect();
        assert_eq!(triggers.len(), 2);
        assert_eq!(triggers[0].metadata.procedure_name.as_deref(), Some("OnInsert"));
        assert_eq!(triggers[1].metadata.procedure_name.as_deref(), Some("OnModify"));

        let procs: Vec<_> = chunks
            .iter()
            .filter(|c| c.metadata.chunk_type == ChunkType::Procedure)
            .collect();
        assert_eq!(procs.len(), 1);
        assert_eq!(procs[0].metadata.procedure_name.as_deref(), Some("ValidateCity"));
        assert!(procs[0].content.contains("local procedure ValidateCity"));
    }

    #[test]
    fn test_emission_order_header_sections_procedures() {
        let obj = parse_one(triggered_table());
        let config = ChunkingConfig {
            max_chunk_chars: 400,
            ..Default::default()
        };
        let chunks = chunk_object(&obj, "t.al", &config);
        let kinds: Vec<ChunkType> = chunks.iter().map(|c| c.metadata.chunk_type).collect();
        let header_pos = kinds.iter().position(|k| *k == ChunkType::Header).unwrap();
        let first_section = kinds.iter().position(|k| *k == ChunkType::Section).unwrap();
        let first_exec = kinds
            .iter()
            .position(|k| matches!(k, ChunkType::Procedure | ChunkType::Trigger))
            .unwrap();
        assert!(header_pos < first_section);
        assert!(first_section < first_exec);
    }

    #[test]
    fn test_context_header_format() {
        let obj = parse_one(triggered_table());
        let config = ChunkingConfig {
            max_chunk_chars: 400,
            ..Default::default()
        };
        let chunks = chunk_object(&obj, "src/tables/Tab50100.al", &config);
        for chunk in &chunks {
            let mut lines = chunk.content.lines();
            assert_eq!(
                lines.next(),
                Some("// Object: table 50100 \"Customer Address\"")
            );
            assert_eq!(lines.next(), Some("// File: src/tables/Tab50100.al"));
            assert_eq!(lines.next(), Some(""));
        }
    }

    #[test]
    fn test_context_header_disabled() {
        let obj = parse_one(triggered_table());
        let config = ChunkingConfig {
            max_chunk_chars: 400,
            include_context_header: false,
            ..Default::default()
        };
        for chunk in chunk_object(&obj, "t.al", &config) {
            assert!(!chunk.content.starts_with("// Object:"));
        }
    }

    #[test]
    fn test_context_header_omits_interface_id() {
        let src = "interface \"IAddress Provider\"\n{\n    procedure GetAddress(CustomerNo: Code[20]): Text;\n    procedure GetCity(CustomerNo: Code[20]): Text[30];\n    procedure GetPostCode(CustomerNo: Code[20]): Code[20];\n}";
        let obj = parse_one(src);
        let config = ChunkingConfig {
            max_chunk_chars: 60,
            ..Default::default()
        };
        let chunks = chunk_object(&obj, "interface.al", &config);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.content.starts_with("// Object: interface \"IAddress Provider\""));
        }
    }

    #[test]
    fn test_context_header_does_not_shift_line_numbers() {
        let obj = parse_one(triggered_table());
        let with_header = ChunkingConfig {
            max_chunk_chars: 400,
            ..Default::default()
        };
        let without_header = ChunkingConfig {
            max_chunk_chars: 400,
            include_context_header: false,
            ..Default::default()
        };
        let a = chunk_object(&obj, "t.al", &with_header);
        let b = chunk_object(&obj, "t.al", &without_header);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.metadata.line_start, y.metadata.line_start);
            assert_eq!(x.metadata.line_end, y.metadata.line_end);
        }
    }

    #[test]
    fn test_token_estimate() {
        let obj = parse_one(small_enum());
        let chunks = chunk_object(&obj, "e.al", &ChunkingConfig::default());
        let expected = (chunks[0].content.chars().count() / 4).max(1);
        assert_eq!(chunks[0].token_estimate, expected);

        let disabled = ChunkingConfig {
            estimate_tokens: false,
            ..Default::default()
        };
        let chunks = chunk_object(&obj, "e.al", &disabled);
        assert_eq!(chunks[0].token_estimate, 0);
    }

    #[test]
    fn test_oversize_section_splits_at_sub_blocks() {
        let mut fields = String::from("table 50100 Wide\n{\n    fields\n    {\n");
        for i in 1..=12 {
            fields.push_str(&format!(
                "        field({i}; Field{i}; Text[100]) {{ Caption = 'Field number {i} with a deliberately long caption'; }}\n"
            ));
        }
        fields.push_str("    }\n}");
        let obj = parse_one(&fields);
        let config = ChunkingConfig {
            max_chunk_chars: 400,
            ..Default::default()
        };
        let chunks = chunk_object(&obj, "wide.al", &config);
        let sections: Vec<_> = chunks
            .iter()
            .filter(|c| c.metadata.chunk_type == ChunkType::Section)
            .collect();
        assert!(sections.len() >= 2, "expected a split, got {}", sections.len());
        // groups never cross sub-block boundaries: every section chunk ends
        // on a block close
        for chunk in &sections {
            let body = chunk.content.rsplit("\n\n").next().unwrap();
            assert!(body.trim_end().ends_with('}'));
        }
        // first group covers the section header lines
        assert!(sections[0].content.contains("fields"));
        // coverage is contiguous across groups
        for pair in sections.windows(2) {
            assert_eq!(pair[1].metadata.line_start, pair[0].metadata.line_end + 1);
        }
    }

    #[test]
    fn test_oversize_section_with_single_block_emitted_whole() {
        let src = format!(
            "page 50100 Card\n{{\n    layout\n    {{\n        area(content)\n        {{\n{}        }}\n    }}\n}}",
            "            field(Name; Name) { ApplicationArea = All; }\n".repeat(10)
        );
        let obj = parse_one(&src);
        let config = ChunkingConfig {
            max_chunk_chars: 300,
            ..Default::default()
        };
        let chunks = chunk_object(&obj, "card.al", &config);
        let sections: Vec<_> = chunks
            .iter()
            .filter(|c| c.metadata.chunk_type == ChunkType::Section)
            .collect();
        assert_eq!(sections.len(), 1);
        assert!(sections[0].content.chars().count() > 300);
    }

    #[test]
    fn test_source_table_metadata() {
        let src = "page 50100 \"Customer Address Card\"\n{\n    PageType = Card;\n    SourceTable = \"Customer Address\";\n\n    layout { area(content) { field(City; City) { } } }\n}";
        let obj = parse_one(src);
        let chunks = chunk_object(&obj, "page.al", &ChunkingConfig::default());
        assert_eq!(
            chunks[0].metadata.source_table.as_deref(),
            Some("Customer Address")
        );
    }

    #[test]
    fn test_extends_metadata() {
        let src = "pageextension 50100 \"Customer Card Ext\" extends \"Customer Card\"\n{\n    layout { addlast(content) { field(Loyalty; Loyalty) { } } }\n}";
        let obj = parse_one(src);
        let chunks = chunk_object(&obj, "ext.al", &ChunkingConfig::default());
        assert_eq!(chunks[0].metadata.extends.as_deref(), Some("Customer Card"));
    }

    #[test]
    fn test_degraded_object_yields_single_whole_chunk() {
        let mut obj = parse_one(triggered_table());
        // caller bug: declared range longer than the held text
        obj.line_end = obj.line_start + 500;
        let config = ChunkingConfig {
            max_chunk_chars: 10,
            ..Default::default()
        };
        let chunks = chunk_object(&obj, "t.al", &config);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].metadata.chunk_type, ChunkType::WholeObject);
    }

    #[test]
    fn test_chunk_file_concatenates_objects() {
        let src = format!("{}\n\n{}", small_enum(), triggered_table());
        let config = ChunkingConfig {
            max_chunk_chars: 400,
            ..Default::default()
        };
        let chunks = chunk_file(&src, "multi.al", &config);
        assert!(chunks.len() > 2);
        let first_hash = &chunks[0].metadata.file_hash;
        assert!(chunks.iter().all(|c| &c.metadata.file_hash == first_hash));
        // enum chunks precede table chunks
        let enum_last = chunks
            .iter()
            .rposition(|c| c.metadata.object_type == AlObjectType::Enum)
            .unwrap();
        let table_first = chunks
            .iter()
            .position(|c| c.metadata.object_type == AlObjectType::Table)
            .unwrap();
        assert!(enum_last < table_first);
    }

    #[test]
    fn test_all_chunks_within_object_range() {
        let obj = parse_one(triggered_table());
        let config = ChunkingConfig {
            max_chunk_chars: 300,
            ..Default::default()
        };
        for chunk in chunk_object(&obj, "t.al", &config) {
            assert!(chunk.metadata.line_start >= obj.line_start);
            assert!(chunk.metadata.line_end <= obj.line_end);
            assert!(chunk.metadata.line_start <= chunk.metadata.line_end);
        }
    }

    #[test]
    fn test_no_empty_chunks() {
        let obj = parse_one(triggered_table());
        for max in [100, 200, 400, 1000, 5000] {
            let config = ChunkingConfig {
                max_chunk_chars: max,
                ..Default::default()
            };
            for chunk in chunk_object(&obj, "t.al", &config) {
                assert!(!chunk.content.trim().is_empty());
            }
        }
    }
}
