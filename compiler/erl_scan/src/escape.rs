//! Backslash escape decoding.
//!
//! Shared by quoted strings, quoted atoms, character literals and the
//! escape-decoding sigils. The decoder looks at the text following a
//! backslash and reports how many characters the escape spans, so callers
//! can advance their cursor and column by exactly that amount.
//!
//! # Escapes
//!
//! - `\NNN`: 1-3 octal digits
//! - `\xHH`: exactly two hex digits
//! - `\x{H...}`: one or more hex digits, must be a valid scalar value
//! - `\^X`: control character `X & 0x1F` for `X` in `@`..=`_` or `a`..=`z`;
//!   `\^?` is DEL
//! - `\n \r \t \v \b \f \e \s \d`: named control characters
//! - `\<newline>`: the newline itself (counted as a line break)
//! - any other valid character: itself

use crate::char_class::{is_octal_digit, is_text_char, is_valid_scalar};

/// Result of decoding one escape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Escape {
    /// Decoded character; `len` characters after the backslash were used.
    Char { value: char, len: usize },
    /// `\` followed by a newline.
    Newline,
    /// The chunk ended mid-escape; wait for more input.
    NeedMore,
    /// Input ended mid-escape.
    Eof,
    /// Malformed escape; `len` characters after the backslash, including the
    /// offending one, were examined.
    Illegal { len: usize },
}

/// Decode the escape whose text (after the backslash) starts `rest`.
///
/// `at_eof` tells whether `rest` is everything that will ever arrive.
pub(crate) fn decode(rest: &str, at_eof: bool) -> Escape {
    let incomplete = if at_eof { Escape::Eof } else { Escape::NeedMore };
    let mut chars = rest.chars();
    let Some(first) = chars.next() else {
        return incomplete;
    };

    match first {
        '0'..='7' => octal(rest, at_eof),
        'x' => hex(&rest[1..], at_eof),
        '^' => match chars.next() {
            None => incomplete,
            Some(c) => match caret_code(c) {
                Some(value) => Escape::Char { value, len: 2 },
                None => Escape::Illegal { len: 2 },
            },
        },
        '\n' => Escape::Newline,
        c if is_text_char(c) => Escape::Char {
            value: named(c),
            len: 1,
        },
        _ => Escape::Illegal { len: 1 },
    }
}

/// Up to three octal digits, greedily.
fn octal(rest: &str, at_eof: bool) -> Escape {
    let digits: Vec<char> = rest.chars().take(3).take_while(|&c| is_octal_digit(c)).collect();
    // Fewer than three digits that reach the end of the chunk might continue.
    if digits.len() < 3 && rest.chars().nth(digits.len()).is_none() && !at_eof {
        return Escape::NeedMore;
    }
    let value = digits
        .iter()
        .fold(0u32, |acc, &d| acc * 8 + d.to_digit(8).unwrap_or(0));
    match char::from_u32(value) {
        Some(value) => Escape::Char {
            value,
            len: digits.len(),
        },
        None => Escape::Illegal { len: digits.len() },
    }
}

/// `\xHH` or `\x{H...}`. `rest` starts after the `x`.
fn hex(rest: &str, at_eof: bool) -> Escape {
    let incomplete = if at_eof { Escape::Eof } else { Escape::NeedMore };
    let mut chars = rest.chars();
    match chars.next() {
        None => incomplete,
        Some('{') => {
            let mut digits = String::new();
            for c in chars {
                if c.is_ascii_hexdigit() {
                    digits.push(c);
                    continue;
                }
                // x, {, digits, then the offending or closing character
                let len = 3 + digits.len();
                if c != '}' || digits.is_empty() {
                    return Escape::Illegal { len };
                }
                return match u32::from_str_radix(&digits, 16) {
                    Ok(code) if is_valid_scalar(code) => match char::from_u32(code) {
                        Some(value) => Escape::Char { value, len },
                        None => Escape::Illegal { len },
                    },
                    _ => Escape::Illegal { len },
                };
            }
            incomplete
        }
        Some(h1) if h1.is_ascii_hexdigit() => match chars.next() {
            None => incomplete,
            Some(h2) if h2.is_ascii_hexdigit() => {
                let code = h1.to_digit(16).unwrap_or(0) * 16 + h2.to_digit(16).unwrap_or(0);
                match char::from_u32(code) {
                    Some(value) => Escape::Char { value, len: 3 },
                    None => Escape::Illegal { len: 3 },
                }
            }
            Some(_) => Escape::Illegal { len: 3 },
        },
        Some(_) => Escape::Illegal { len: 2 },
    }
}

fn caret_code(c: char) -> Option<char> {
    match c {
        '?' => Some('\u{7F}'),
        '@'..='_' | 'a'..='z' => char::from_u32(u32::from(c) & 0x1F),
        _ => None,
    }
}

fn named(c: char) -> char {
    match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0B}',
        'b' => '\u{08}',
        'f' => '\u{0C}',
        'e' => '\u{1B}',
        's' => ' ',
        'd' => '\u{7F}',
        other => other,
    }
}

/// Decode every escape in a complete piece of text.
///
/// Used for triple-quoted sigil strings, whose content is only decoded once
/// the closing line is found. On a malformed escape returns the character
/// offset of the backslash and the number of characters the error spans.
pub(crate) fn decode_all(text: &str) -> Result<String, (usize, usize)> {
    let mut out = String::with_capacity(text.len());
    let mut offset = 0;
    let mut rest = text;
    while let Some(i) = rest.find('\\') {
        out.push_str(&rest[..i]);
        offset += rest[..i].chars().count();
        let after = &rest[i + 1..];
        let len = match decode(after, true) {
            Escape::Char { value, len } => {
                out.push(value);
                len
            }
            Escape::Newline => {
                out.push('\n');
                1
            }
            Escape::NeedMore | Escape::Eof => return Err((offset, 1)),
            Escape::Illegal { len } => return Err((offset, len + 1)),
        };
        let consumed: usize = after.chars().take(len).map(char::len_utf8).sum();
        rest = &after[consumed..];
        offset += len + 1;
    }
    out.push_str(rest);
    Ok(out)
}
