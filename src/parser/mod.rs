//! AL source parsing
//!
//! Recovers an object-level tree from AL source without a grammar: a forward
//! scanner locates object headers (`<kind> [id] <name> [extends <target>] {`),
//! brace-matches the body under the lexical skip rules, and classifies the
//! body's top-level constructs. Malformed objects never abort a file; they
//! are skipped and recorded as diagnostics.

mod body;
pub(crate) mod lexer;

use crate::error::ParseError;
use crate::hash::hash_source;
use crate::types::{AlObject, AlObjectType};
use body::parse_body;

/// Result of parsing one source file: objects in source order, plus
/// non-fatal diagnostics for regions that had to be skipped.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub objects: Vec<AlObject>,
    pub diagnostics: Vec<ParseError>,
}

/// Parse AL source text into zero or more objects.
///
/// Strips a leading UTF-8 BOM before anything else, so line numbers and the
/// file hash are identical with or without it. Multiple objects per source
/// are supported; recognition resumes one past each object's closing brace.
///
/// `file_path` is only used for diagnostics logging; it is not stored on the
/// tree (chunking takes it separately).
pub fn parse_source(text: &str, file_path: &str) -> ParseOutcome {
    let src = text.strip_prefix('\u{feff}').unwrap_or(text);
    let file_hash = hash_source(src);
    let bytes = src.as_bytes();
    let len = bytes.len();

    let mut outcome = ParseOutcome::default();
    let mut i = 0usize;

    while i < len {
        i = match lexer::skip_whitespace_and_comments(src, i) {
            Ok(next) => next,
            Err(err) => {
                outcome.diagnostics.push(err);
                break;
            }
        };
        if i >= len {
            break;
        }

        match lexer::skip_opaque(src, i) {
            Ok(Some(next)) => {
                i = next;
                continue;
            }
            Ok(None) => {}
            Err(err) => {
                outcome.diagnostics.push(err);
                break;
            }
        }

        let Some((word, word_end)) = lexer::read_identifier(src, i) else {
            i += 1;
            continue;
        };
        let Some(object_type) = AlObjectType::from_keyword(word) else {
            i = word_end;
            continue;
        };

        match parse_object(src, i, word_end, object_type, &file_hash) {
            Ok((object, body_diagnostics, resume)) => {
                tracing::debug!(
                    kind = object.object_type.as_str(),
                    id = object.object_id,
                    name = %object.object_name,
                    "parsed object"
                );
                outcome.objects.push(object);
                outcome.diagnostics.extend(body_diagnostics);
                i = resume;
            }
            Err(err) => {
                tracing::warn!(
                    file = file_path,
                    line = err.line(),
                    "skipping malformed object: {err}"
                );
                outcome.diagnostics.push(err);
                // Resume scanning just past the keyword; the next
                // recognizable header start picks the walk back up.
                i = word_end;
            }
        }
    }

    outcome
}

fn malformed(kind: &str, line: usize, reason: &str) -> ParseError {
    ParseError::MalformedHeader {
        kind: kind.to_string(),
        line,
        reason: reason.to_string(),
    }
}

/// A quoted or bare identifier at `i`, unquoted.
fn read_name(src: &str, i: usize) -> Result<Option<(String, usize)>, ParseError> {
    match src.as_bytes().get(i) {
        Some(&b'"') => {
            let end = lexer::skip_quoted_identifier(src, i)?;
            Ok(Some((src[i + 1..end - 1].to_string(), end)))
        }
        _ => Ok(lexer::read_identifier(src, i).map(|(w, end)| (w.to_string(), end))),
    }
}

fn parse_object(
    src: &str,
    kw_start: usize,
    kw_end: usize,
    object_type: AlObjectType,
    file_hash: &str,
) -> Result<(AlObject, Vec<ParseError>, usize), ParseError> {
    let bytes = src.as_bytes();
    let header_line = lexer::line_number(src, kw_start);
    let kind = object_type.as_str();

    let mut i = lexer::skip_whitespace_and_comments(src, kw_end)?;

    // Numeric id, required for every kind except interface.
    let mut object_id: u32 = 0;
    if i < bytes.len() && bytes[i].is_ascii_digit() {
        let mut j = i;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        object_id = src[i..j]
            .parse()
            .map_err(|_| malformed(kind, header_line, "object id out of range"))?;
        i = lexer::skip_whitespace_and_comments(src, j)?;
    } else if object_type.requires_id() {
        return Err(malformed(kind, header_line, "missing object id"));
    }

    let Some((object_name, name_end)) = read_name(src, i)? else {
        return Err(malformed(kind, header_line, "missing object name"));
    };
    i = lexer::skip_whitespace_and_comments(src, name_end)?;

    let mut extends = None;
    if lexer::keyword_at(src, i, "extends") {
        i = lexer::skip_whitespace_and_comments(src, i + "extends".len())?;
        let Some((target, end)) = read_name(src, i)? else {
            return Err(malformed(kind, header_line, "missing extends target"));
        };
        extends = Some(target);
        i = lexer::skip_whitespace_and_comments(src, end)?;
    }

    let mut implements = Vec::new();
    if lexer::keyword_at(src, i, "implements") {
        i = lexer::skip_whitespace_and_comments(src, i + "implements".len())?;
        loop {
            let Some((name, end)) = read_name(src, i)? else {
                return Err(malformed(kind, header_line, "missing interface name"));
            };
            implements.push(name);
            i = lexer::skip_whitespace_and_comments(src, end)?;
            if bytes.get(i) == Some(&b',') {
                i = lexer::skip_whitespace_and_comments(src, i + 1)?;
            } else {
                break;
            }
        }
    }

    if bytes.get(i) != Some(&b'{') {
        return Err(malformed(kind, header_line, "missing '{' after object header"));
    }
    let (open, close) = lexer::find_brace_block(src, i)?;

    let parsed = parse_body(src, open + 1, close);

    let object = AlObject {
        object_type,
        object_id,
        object_name,
        extends,
        implements,
        properties: parsed.properties,
        sections: parsed.sections,
        procedures: parsed.procedures,
        source_text: src[kw_start..=close].to_string(),
        line_start: header_line,
        line_end: lexer::line_number(src, close),
        file_hash: file_hash.to_string(),
    };
    Ok((object, parsed.diagnostics, close + 1))
}
