//! Lexical scanner primitives for AL source
//!
//! The only place lexical rules are encoded. Every higher-level routine
//! routes brace, bracket, paren, and semicolon decisions through here, so a
//! `{` inside a string literal, a comment, or a quoted identifier can never
//! be mistaken for structure.
//!
//! All indices are byte offsets into the source. The scanners only ever
//! compare ASCII bytes and only ever return offsets that sit on ASCII
//! characters, so slicing at a returned offset is always valid UTF-8.

use crate::error::ParseError;

/// 1-based line number of a byte offset.
pub(crate) fn line_number(src: &str, idx: usize) -> usize {
    let end = idx.min(src.len());
    src.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub(crate) fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Read the identifier word starting at `i`. Returns the word and the index
/// just past it, or `None` when `i` does not sit on an identifier start.
pub(crate) fn read_identifier(src: &str, i: usize) -> Option<(&str, usize)> {
    let bytes = src.as_bytes();
    if i >= bytes.len() || !is_ident_start(bytes[i]) {
        return None;
    }
    let mut j = i + 1;
    while j < bytes.len() && is_ident_char(bytes[j]) {
        j += 1;
    }
    Some((&src[i..j], j))
}

/// Case-insensitive whole-word probe: is keyword `kw` at offset `i`?
pub(crate) fn keyword_at(src: &str, i: usize, kw: &str) -> bool {
    let bytes = src.as_bytes();
    if i + kw.len() > bytes.len() || !src[i..i + kw.len()].eq_ignore_ascii_case(kw) {
        return false;
    }
    if i > 0 && is_ident_char(bytes[i - 1]) {
        return false;
    }
    match bytes.get(i + kw.len()) {
        Some(&b) => !is_ident_char(b),
        None => true,
    }
}

/// When `i` sits at the start of a string literal, quoted identifier, line
/// comment, or block comment, return the index just past it.
///
/// The shared skip rule for all the structural scanners below.
pub(crate) fn skip_opaque(src: &str, i: usize) -> Result<Option<usize>, ParseError> {
    let bytes = src.as_bytes();
    match bytes.get(i) {
        Some(&b'\'') => skip_string(src, i).map(Some),
        Some(&b'"') => skip_quoted_identifier(src, i).map(Some),
        Some(&b'/') if bytes.get(i + 1) == Some(&b'/') => {
            let mut j = i + 2;
            while j < bytes.len() && bytes[j] != b'\n' {
                j += 1;
            }
            Ok(Some(j))
        }
        Some(&b'/') if bytes.get(i + 1) == Some(&b'*') => match src[i + 2..].find("*/") {
            Some(off) => Ok(Some(i + 2 + off + 2)),
            None => Err(ParseError::UnterminatedComment {
                line: line_number(src, i),
            }),
        },
        _ => Ok(None),
    }
}

/// Advance past spaces, tabs, CR, LF, `// ...` line comments, and
/// non-nesting `/* ... */` block comments. Returns `src.len()` at end of
/// input.
pub(crate) fn skip_whitespace_and_comments(src: &str, mut i: usize) -> Result<usize, ParseError> {
    let bytes = src.as_bytes();
    let len = bytes.len();
    loop {
        while i < len && matches!(bytes[i], b' ' | b'\t' | b'\r' | b'\n') {
            i += 1;
        }
        if i + 1 < len && bytes[i] == b'/' && (bytes[i + 1] == b'/' || bytes[i + 1] == b'*') {
            // skip_opaque only returns None for non-comment starts, which the
            // guard above already excludes
            if let Some(next) = skip_opaque(src, i)? {
                i = next;
                continue;
            }
        }
        return Ok(i);
    }
}

/// Skip an AL string literal starting at `i` (which must hold `'`).
/// A doubled `''` is an embedded quote, not termination.
pub(crate) fn skip_string(src: &str, i: usize) -> Result<usize, ParseError> {
    let bytes = src.as_bytes();
    debug_assert_eq!(bytes.get(i), Some(&b'\''));
    let mut j = i + 1;
    while j < bytes.len() {
        if bytes[j] == b'\'' {
            if bytes.get(j + 1) == Some(&b'\'') {
                j += 2;
                continue;
            }
            return Ok(j + 1);
        }
        j += 1;
    }
    Err(ParseError::UnterminatedString {
        line: line_number(src, i),
    })
}

/// Skip a quoted identifier starting at `i` (which must hold `"`).
/// No escape rules beyond matching the closing quote.
pub(crate) fn skip_quoted_identifier(src: &str, i: usize) -> Result<usize, ParseError> {
    let bytes = src.as_bytes();
    debug_assert_eq!(bytes.get(i), Some(&b'"'));
    let mut j = i + 1;
    while j < bytes.len() {
        if bytes[j] == b'"' {
            return Ok(j + 1);
        }
        j += 1;
    }
    Err(ParseError::UnterminatedString {
        line: line_number(src, i),
    })
}

/// Find the `}` matching the `{` at `open`, ignoring braces inside strings,
/// quoted identifiers, and comments. Returns `(open, close)`.
pub(crate) fn find_brace_block(src: &str, open: usize) -> Result<(usize, usize), ParseError> {
    let bytes = src.as_bytes();
    debug_assert_eq!(bytes.get(open), Some(&b'{'));
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        if let Some(next) = skip_opaque(src, i)? {
            i = next;
            continue;
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((open, i));
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(ParseError::UnterminatedBlock {
        line: line_number(src, open),
    })
}

/// Find the `]` matching the `[` at `open` under the same skip rules.
pub(crate) fn find_bracket_close(src: &str, open: usize) -> Result<usize, ParseError> {
    let bytes = src.as_bytes();
    debug_assert_eq!(bytes.get(open), Some(&b'['));
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        if let Some(next) = skip_opaque(src, i)? {
            i = next;
            continue;
        }
        match bytes[i] {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(ParseError::UnterminatedBlock {
        line: line_number(src, open),
    })
}

/// Find the `)` matching the `(` at `open` under the same skip rules.
pub(crate) fn find_paren_close(src: &str, open: usize) -> Result<usize, ParseError> {
    let bytes = src.as_bytes();
    debug_assert_eq!(bytes.get(open), Some(&b'('));
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        if let Some(next) = skip_opaque(src, i)? {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(ParseError::UnterminatedStatement {
        line: line_number(src, open),
    })
}

/// Find the first `;` at the current logical depth, ignoring semicolons
/// inside strings, comments, quoted identifiers, parentheses, and nested
/// braces. Leaving the enclosing block before a `;` is found fails too.
pub(crate) fn find_end_semicolon(src: &str, start: usize) -> Result<usize, ParseError> {
    let bytes = src.as_bytes();
    let mut paren_depth = 0i32;
    let mut brace_depth = 0i32;
    let mut i = start;
    while i < bytes.len() {
        if let Some(next) = skip_opaque(src, i)? {
            i = next;
            continue;
        }
        match bytes[i] {
            b'(' => paren_depth += 1,
            b')' => paren_depth -= 1,
            b'{' => brace_depth += 1,
            b'}' => {
                brace_depth -= 1;
                if brace_depth < 0 {
                    return Err(ParseError::UnterminatedStatement {
                        line: line_number(src, start),
                    });
                }
            }
            b';' if paren_depth <= 0 && brace_depth == 0 => return Ok(i),
            _ => {}
        }
        i += 1;
    }
    Err(ParseError::UnterminatedStatement {
        line: line_number(src, start),
    })
}
