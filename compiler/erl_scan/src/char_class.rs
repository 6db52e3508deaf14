//! Character classification.
//!
//! Letter classes follow the historical Latin-1 source encoding rules:
//! ASCII letters plus the two Latin-1 letter bands, each with one
//! punctuation character carved out (`×` in the uppercase band, `÷` in the
//! lowercase band). Characters outside Latin-1 are never letters, so they
//! scan as one-character symbols.

/// `×`, inside the Latin-1 uppercase band.
const MULTIPLICATION_SIGN: char = '\u{D7}';
/// `÷`, inside the Latin-1 lowercase band.
const DIVISION_SIGN: char = '\u{F7}';

/// Whitespace: the ASCII control range up to space, and `0x80..=0xA0`.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, '\0'..=' ' | '\u{80}'..='\u{A0}')
}

/// Horizontal whitespace: whitespace other than newline.
#[inline]
pub fn is_inline_whitespace(c: char) -> bool {
    c != '\n' && is_whitespace(c)
}

#[inline]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub fn is_uppercase_letter(c: char) -> bool {
    c.is_ascii_uppercase() || (('\u{C0}'..='\u{DE}').contains(&c) && c != MULTIPLICATION_SIGN)
}

#[inline]
pub fn is_lowercase_letter(c: char) -> bool {
    c.is_ascii_lowercase() || (('\u{DF}'..='\u{FF}').contains(&c) && c != DIVISION_SIGN)
}

#[inline]
pub fn is_letter(c: char) -> bool {
    is_lowercase_letter(c) || is_uppercase_letter(c)
}

/// Any code point below `0x110000`.
#[inline]
pub fn is_valid_character(c: u32) -> bool {
    c < 0x11_0000
}

/// Code points accepted as text: no surrogates, no `0xFFFE`/`0xFFFF`.
#[inline]
pub fn is_valid_scalar(c: u32) -> bool {
    matches!(c, 0..=0xD7FF | 0xE000..=0xFFFD | 0x1_0000..=0x10_FFFF)
}

/// [`is_valid_scalar`] for a `char`.
#[inline]
pub fn is_text_char(c: char) -> bool {
    is_valid_scalar(u32::from(c))
}

#[inline]
pub fn is_atom_start(c: char) -> bool {
    is_lowercase_letter(c)
}

#[inline]
pub fn is_var_start(c: char) -> bool {
    c == '_' || is_uppercase_letter(c)
}

/// Characters allowed after the first character of an atom or variable.
#[inline]
pub fn is_name_continue(c: char) -> bool {
    is_letter(c) || is_digit(c) || c == '_' || c == '@'
}

#[inline]
pub fn is_octal_digit(c: char) -> bool {
    matches!(c, '0'..='7')
}

/// Value of `c` as a digit in `base` (2..=36), if it is one.
#[inline]
pub fn digit_value(c: char, base: u32) -> Option<u32> {
    c.to_digit(base)
}
