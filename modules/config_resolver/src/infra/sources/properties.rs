//! `.properties` file parser

use std::collections::BTreeMap;

/// Properties syntax error with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

/// Parse properties content into key/value pairs
///
/// Later duplicates override earlier ones.
pub fn parse(content: &str) -> Result<BTreeMap<String, String>, ParseError> {
    let mut values = BTreeMap::new();
    let mut lines = content.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let start_line = index + 1;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        // Join continuation lines into one logical line
        let mut logical = trimmed.to_string();
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        let key = unescape(key).map_err(|message| ParseError {
            line: start_line,
            message,
        })?;
        let value = unescape(trim_unescaped_end(value)).map_err(|message| ParseError {
            line: start_line,
            message,
        })?;
        values.insert(key, value);
    }

    Ok(values)
}

/// Odd number of trailing backslashes
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split at the first unescaped `=`, `:` or whitespace; one `=`/`:` after
/// optional whitespace is consumed as part of the separator
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || c.is_whitespace() {
            key_end = i;
            break;
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start();
    if let Some(stripped) = rest.strip_prefix('=').or_else(|| rest.strip_prefix(':')) {
        rest = stripped.trim_start();
    }
    (key, rest)
}

/// Trim trailing whitespace that is not escaped: `a\ ` keeps its space
fn trim_unescaped_end(value: &str) -> &str {
    let mut escaped = false;
    let mut end = 0;

    for (i, c) in value.char_indices() {
        if escaped {
            escaped = false;
            end = i + c.len_utf8();
        } else if c == '\\' {
            escaped = true;
            end = i + c.len_utf8();
        } else if !c.is_whitespace() {
            end = i + c.len_utf8();
        }
    }

    &value[..end]
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => out.push(decode_unicode_escape(&mut chars)?),
            Some(other) => out.push(other),
            // Backslash at end of input, left over from a continuation on the last line
            None => {}
        }
    }

    Ok(out)
}

/// Decode the hex digits after `\u`, joining a UTF-16 surrogate pair written
/// as two consecutive escapes
fn decode_unicode_escape(chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    let unit = read_hex4(chars)?;

    if (0xD800..=0xDBFF).contains(&unit) {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            if let Ok(low) = read_hex4(&mut lookahead) {
                if (0xDC00..=0xDFFF).contains(&low) {
                    *chars = lookahead;
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    return char::from_u32(code).ok_or_else(|| {
                        format!("invalid surrogate pair \\u{:04X}\\u{:04X}", unit, low)
                    });
                }
            }
        }
        return Err(format!("unpaired surrogate escape '\\u{:04X}'", unit));
    }

    char::from_u32(unit).ok_or_else(|| format!("unpaired surrogate escape '\\u{:04X}'", unit))
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Result<u32, String> {
    let hex: String = chars.by_ref().take(4).collect();
    (hex.len() == 4)
        .then(|| u32::from_str_radix(&hex, 16).ok())
        .flatten()
        .ok_or_else(|| format!("malformed \\u escape '\\u{}'", hex))
}
