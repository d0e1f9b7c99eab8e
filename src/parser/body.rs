//! Object body parser
//!
//! Walks the brace block of a located object at depth 1 and classifies each
//! construct by its first token: `[...]` attribute runs, access modifiers,
//! `procedure`/`trigger` declarations, named sections, and property
//! assignments. Anything the classifier cannot place (global `var`
//! declarations, stray tokens) is skipped without aborting the object.

use crate::error::ParseError;
use crate::parser::lexer::{
    find_brace_block, find_bracket_close, find_end_semicolon, find_paren_close, is_ident_char,
    is_ident_start, keyword_at, line_number, read_identifier, skip_opaque,
    skip_quoted_identifier, skip_whitespace_and_comments,
};
use crate::types::{AccessModifier, AlProcedure, AlProperty, AlSection, ProcedureKind};

/// Members extracted from one object body, plus at most one diagnostic when
/// a construct-level lexical error cut the walk short.
#[derive(Debug, Default)]
pub(crate) struct ParsedBody {
    pub properties: Vec<AlProperty>,
    pub sections: Vec<AlSection>,
    pub procedures: Vec<AlProcedure>,
    pub diagnostics: Vec<ParseError>,
}

/// Parse the object body between `body_start` and `body_end` (both exclusive
/// of the object's outer braces).
pub(crate) fn parse_body(src: &str, body_start: usize, body_end: usize) -> ParsedBody {
    let mut out = ParsedBody::default();
    if let Err(err) = walk_body(src, body_start, body_end, &mut out) {
        tracing::warn!(line = err.line(), "stopping body walk: {err}");
        out.diagnostics.push(err);
    }
    out
}

fn walk_body(
    src: &str,
    body_start: usize,
    body_end: usize,
    out: &mut ParsedBody,
) -> Result<(), ParseError> {
    let bytes = src.as_bytes();
    let mut i = body_start;

    while i < body_end {
        i = skip_whitespace_and_comments(src, i)?;
        if i >= body_end {
            break;
        }

        // Collect consecutive [...] attribute blocks. They attach to a
        // following procedure/trigger; before anything else they are
        // discarded.
        let mut attributes: Vec<String> = Vec::new();
        let mut construct_start = i;
        while i < body_end && bytes[i] == b'[' {
            let close = find_bracket_close(src, i)?;
            attributes.push(src[i..=close].to_string());
            i = skip_whitespace_and_comments(src, close + 1)?;
        }
        if i >= body_end {
            break;
        }
        if attributes.is_empty() {
            construct_start = i;
        }

        // Opaque regions at depth 1 (stray strings, quoted identifiers)
        // carry no structure; step over them.
        if let Some(next) = skip_opaque(src, i)? {
            i = next;
            continue;
        }

        let Some((word, word_end)) = read_identifier(src, i) else {
            i += 1;
            continue;
        };

        // Access modifier, only meaningful before procedure/trigger.
        if let Some(access) = AccessModifier::from_keyword(word) {
            let after = skip_whitespace_and_comments(src, word_end)?;
            if after < body_end
                && (keyword_at(src, after, "procedure") || keyword_at(src, after, "trigger"))
            {
                let (kw, kw_end) = read_identifier(src, after).expect("keyword probed above");
                let kind = procedure_kind(kw);
                let (proc, resume) = parse_procedure(
                    src,
                    ProcedureInput {
                        kind,
                        kind_end: kw_end,
                        access: if kind == ProcedureKind::Trigger {
                            // triggers never carry a modifier
                            AccessModifier::Public
                        } else {
                            access
                        },
                        attributes: std::mem::take(&mut attributes),
                        construct_start,
                    },
                )?;
                out.procedures.push(proc);
                i = resume;
                continue;
            }
            // Not a declaration; fall through and classify `word` normally.
        }

        if word.eq_ignore_ascii_case("procedure") || word.eq_ignore_ascii_case("trigger") {
            let (proc, resume) = parse_procedure(
                src,
                ProcedureInput {
                    kind: procedure_kind(word),
                    kind_end: word_end,
                    access: AccessModifier::Public,
                    attributes: std::mem::take(&mut attributes),
                    construct_start,
                },
            )?;
            out.procedures.push(proc);
            i = resume;
            continue;
        }

        let after = skip_whitespace_and_comments(src, word_end)?;
        if after >= body_end {
            break;
        }

        match bytes[after] {
            b'{' => {
                i = push_section(src, out, word, i, after)?;
            }
            b'(' => {
                // Named block with a parenthesized qualifier, e.g.
                // area(content) { ... } or dataitem(Customer; Customer) { ... }
                let close = find_paren_close(src, after)?;
                let brace = skip_whitespace_and_comments(src, close + 1)?;
                if brace < body_end && bytes[brace] == b'{' {
                    i = push_section(src, out, word, i, brace)?;
                } else {
                    i = close + 1;
                }
            }
            b'=' => {
                let semi = find_end_semicolon(src, after + 1)?;
                out.properties.push(AlProperty {
                    name: word.to_string(),
                    value: src[after + 1..semi].trim().to_string(),
                    line_start: line_number(src, i),
                    line_end: line_number(src, semi),
                });
                i = semi + 1;
            }
            _ => {
                // Global var declarations and other unclassified tokens.
                i = word_end;
            }
        }
    }

    Ok(())
}

fn procedure_kind(word: &str) -> ProcedureKind {
    if word.eq_ignore_ascii_case("trigger") {
        ProcedureKind::Trigger
    } else {
        ProcedureKind::Procedure
    }
}

fn push_section(
    src: &str,
    out: &mut ParsedBody,
    name: &str,
    name_start: usize,
    brace: usize,
) -> Result<usize, ParseError> {
    let (open, close) = find_brace_block(src, brace)?;
    out.sections.push(AlSection {
        name: name.to_ascii_lowercase(),
        body_text: src[open + 1..close].to_string(),
        line_start: line_number(src, name_start),
        line_end: line_number(src, close),
        children: Vec::new(),
    });
    Ok(close + 1)
}

struct ProcedureInput {
    kind: ProcedureKind,
    /// Index just past the `procedure`/`trigger` keyword
    kind_end: usize,
    access: AccessModifier,
    attributes: Vec<String>,
    /// First attribute, access modifier, or the keyword itself
    construct_start: usize,
}

/// What the scan after the parameter list ran into first.
enum AfterSignature {
    Terminator(usize),
    VarKeyword(usize),
    BeginKeyword(usize),
}

fn parse_procedure(src: &str, input: ProcedureInput) -> Result<(AlProcedure, usize), ParseError> {
    let bytes = src.as_bytes();
    let kind_start = input.kind_end - input.kind_len();
    let declaration_line = line_number(src, kind_start);

    // Name: quoted identifier or bare word.
    let mut i = skip_whitespace_and_comments(src, input.kind_end)?;
    let name;
    match bytes.get(i) {
        Some(&b'"') => {
            let end = skip_quoted_identifier(src, i)?;
            name = src[i + 1..end - 1].to_string();
            i = end;
        }
        _ => {
            let Some((word, end)) = read_identifier(src, i) else {
                return Err(ParseError::UnterminatedStatement {
                    line: declaration_line,
                });
            };
            name = word.to_string();
            i = end;
        }
    }

    // Parameter list.
    i = skip_whitespace_and_comments(src, i)?;
    if bytes.get(i) != Some(&b'(') {
        return Err(ParseError::UnterminatedStatement {
            line: declaration_line,
        });
    }
    let params_close = find_paren_close(src, i)?;

    // Return specification runs up to the declaration terminator, a `var`
    // block, or the body's `begin`.
    let ret_start = skip_whitespace_and_comments(src, params_close + 1)?;
    let (stop, stop_idx) = scan_after_signature(src, ret_start, declaration_line)?;
    let return_type = extract_return_type(&src[ret_start..stop_idx]);

    let (signature_text, body_text, terminator) = match stop {
        AfterSignature::Terminator(semi) => {
            // Declaration with no body (interface members).
            (src[kind_start..=semi].to_string(), String::new(), semi)
        }
        AfterSignature::VarKeyword(var_idx) => {
            let begin = find_begin_keyword(src, var_idx + 3, declaration_line)?;
            build_bodied(src, kind_start, begin)?
        }
        AfterSignature::BeginKeyword(begin) => build_bodied(src, kind_start, begin)?,
    };

    let proc = AlProcedure {
        kind: input.kind,
        name,
        access: input.access,
        attributes: input.attributes,
        return_type,
        signature_text,
        body_text,
        line_start: line_number(src, input.construct_start),
        line_end: line_number(src, terminator),
    };
    Ok((proc, terminator + 1))
}

impl ProcedureInput {
    fn kind_len(&self) -> usize {
        match self.kind {
            ProcedureKind::Procedure => "procedure".len(),
            ProcedureKind::Trigger => "trigger".len(),
        }
    }
}

/// Scan forward from the parameter list for whichever comes first: a `;`
/// terminating a bodyless declaration, a `var` block, or the body's `begin`.
fn scan_after_signature(
    src: &str,
    start: usize,
    declaration_line: usize,
) -> Result<(AfterSignature, usize), ParseError> {
    let bytes = src.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        i = skip_whitespace_and_comments(src, i)?;
        if i >= bytes.len() {
            break;
        }
        if keyword_at(src, i, "begin") {
            return Ok((AfterSignature::BeginKeyword(i), i));
        }
        if keyword_at(src, i, "var") {
            return Ok((AfterSignature::VarKeyword(i), i));
        }
        if let Some(next) = skip_opaque(src, i)? {
            i = next;
            continue;
        }
        match bytes[i] {
            b';' => return Ok((AfterSignature::Terminator(i), i)),
            b'(' => i = find_paren_close(src, i)? + 1,
            b'[' => i = find_bracket_close(src, i)? + 1,
            b if is_ident_start(b) => {
                let (_, end) = read_identifier(src, i).expect("ident start probed");
                i = end;
            }
            _ => i += 1,
        }
    }
    Err(ParseError::UnterminatedStatement {
        line: declaration_line,
    })
}

/// Pull the type out of a return specification such as `: Text[100]` or
/// `Formatted: Text`.
fn extract_return_type(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.split_once(':') {
        Some((_, ty)) => {
            let ty = ty.trim();
            (!ty.is_empty()).then(|| ty.to_string())
        }
        None => Some(raw.to_string()),
    }
}

/// Locate the `begin` keyword after a `var` block.
fn find_begin_keyword(
    src: &str,
    start: usize,
    declaration_line: usize,
) -> Result<usize, ParseError> {
    let bytes = src.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        i = skip_whitespace_and_comments(src, i)?;
        if i >= bytes.len() {
            break;
        }
        if keyword_at(src, i, "begin") {
            return Ok(i);
        }
        if let Some(next) = skip_opaque(src, i)? {
            i = next;
            continue;
        }
        match read_identifier(src, i) {
            Some((_, end)) => i = end,
            None => i += 1,
        }
    }
    Err(ParseError::UnterminatedStatement {
        line: declaration_line,
    })
}

/// Signature text (through the line containing `begin`), body text (`begin`
/// through the matching `end;`), and the terminator index.
fn build_bodied(
    src: &str,
    kind_start: usize,
    begin: usize,
) -> Result<(String, String, usize), ParseError> {
    let terminator = find_matching_end(src, begin)?;
    let signature_end = src[begin..]
        .find('\n')
        .map(|off| begin + off)
        .unwrap_or(src.len());
    let signature_text = src[kind_start..signature_end].trim_end().to_string();
    let body_text = src[begin..=terminator].to_string();
    Ok((signature_text, body_text, terminator))
}

/// Find the `end` matching the `begin` at `begin`, counting
/// `begin`/`case`/`repeat` as openers and `end`/`until` as closers, with
/// tokens inside strings, comments, and quoted identifiers skipped.
///
/// Returns the index of the `;` after the final `end` (the last character of
/// `end` when the semicolon is missing).
pub(crate) fn find_matching_end(src: &str, begin: usize) -> Result<usize, ParseError> {
    debug_assert!(keyword_at(src, begin, "begin"));
    let bytes = src.as_bytes();
    let len = bytes.len();
    let mut depth = 0i32;
    let mut i = begin;
    while i < len {
        if let Some(next) = skip_opaque(src, i)? {
            i = next;
            continue;
        }
        if is_ident_start(bytes[i]) && (i == 0 || !is_ident_char(bytes[i - 1])) {
            let (word, word_end) = read_identifier(src, i).expect("ident start probed");
            if word.eq_ignore_ascii_case("begin")
                || word.eq_ignore_ascii_case("case")
                || word.eq_ignore_ascii_case("repeat")
            {
                depth += 1;
            } else if word.eq_ignore_ascii_case("end") {
                depth -= 1;
                if depth == 0 {
                    let mut j = word_end;
                    while j < len && matches!(bytes[j], b' ' | b'\t' | b'\r' | b'\n') {
                        j += 1;
                    }
                    if j < len && bytes[j] == b';' {
                        return Ok(j);
                    }
                    return Ok(word_end - 1);
                }
            } else if word.eq_ignore_ascii_case("until") {
                depth -= 1;
            }
            i = word_end;
            continue;
        }
        i += 1;
    }
    Err(ParseError::UnterminatedBlock {
        line: line_number(src, begin),
    })
}
