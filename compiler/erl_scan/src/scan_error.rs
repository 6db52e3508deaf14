//! Scan error types.
//!
//! Lexical errors are data, never panics: the scanner stops at the first
//! error and reports it as [`ScanError`] together with the end location and
//! the unconsumed input. Each kind renders a stable message through
//! `Display`; callers should match on the kind, not the text.

use std::fmt;

use crate::location::Location;

/// Number of decoded characters of an unterminated literal kept for the
/// diagnostic.
pub(crate) const UNTERMINATED_HEAD_LEN: usize = 16;

/// The thing that was illegal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum IllegalKind {
    #[error("character")]
    Character,
    #[error("atom")]
    Atom,
    #[error("var")]
    Var,
    #[error("string")]
    String,
    #[error("sigil_prefix")]
    SigilPrefix,
    #[error("sigil_suffix")]
    SigilSuffix,
    #[error("integer")]
    Integer,
    #[error("float")]
    Float,
}

/// What kind of scan error occurred.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ScanErrorKind {
    // === Unterminated literals ===
    /// `$` at end of input, or an escape cut off by end of input.
    #[error("unterminated character")]
    UnterminatedChar,
    /// Missing closing `'`.
    #[error("unterminated atom starting with '{head}'")]
    UnterminatedAtom { head: String },
    /// Missing closing `"`.
    #[error("unterminated string starting with \"{head}\"")]
    UnterminatedString { head: String },
    /// No closing line for a triple-quoted string.
    #[error("unterminated triple-quoted string starting with \"{head}\"")]
    UnterminatedTripleQuoted { head: String },
    /// Missing closing delimiter of a sigil string.
    #[error("unterminated sigil string starting with \"{head}\"")]
    UnterminatedSigil { head: String },

    // === Illegal lexemes ===
    #[error("illegal {0}")]
    Illegal(IllegalKind),
    /// Integer base outside 2..=36. Carries the base as written.
    #[error("illegal base '{0}'")]
    IllegalBase(String),

    // === Triple-quoted layout ===
    /// A content line does not start with the closing line's indentation.
    #[error("bad indentation in triple-quoted string")]
    Indentation,
    /// Non-whitespace after the opening quotes of a triple-quoted string.
    #[error("white space expected after the opening quotes of a triple-quoted string")]
    WhiteSpace,

    /// `"a""b"`: adjacent string literals with nothing in between.
    #[error("adjacent string literals without intervening white space")]
    StringConcat,
}

impl ScanErrorKind {
    #[inline]
    pub fn illegal(what: IllegalKind) -> Self {
        ScanErrorKind::Illegal(what)
    }

    /// Returns `true` for the unterminated-literal family, i.e. errors that
    /// more input could have avoided.
    pub fn is_unterminated(&self) -> bool {
        matches!(
            self,
            ScanErrorKind::UnterminatedChar
                | ScanErrorKind::UnterminatedAtom { .. }
                | ScanErrorKind::UnterminatedString { .. }
                | ScanErrorKind::UnterminatedTripleQuoted { .. }
                | ScanErrorKind::UnterminatedSigil { .. }
        )
    }
}

/// A scan error: WHERE it starts and WHAT went wrong.
///
/// The end of the offending text is reported next to the error in
/// [`Outcome::Error`](crate::Outcome::Error).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScanError {
    pub location: Location,
    pub kind: ScanErrorKind,
}

impl ScanError {
    #[cold]
    pub(crate) fn new(location: Location, kind: ScanErrorKind) -> Self {
        Self { location, kind }
    }

    #[cold]
    pub(crate) fn illegal(location: Location, what: IllegalKind) -> Self {
        Self::new(location, ScanErrorKind::Illegal(what))
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

impl std::error::Error for ScanError {}

/// First characters of a partial literal, for unterminated diagnostics.
pub(crate) fn unterminated_head(content: &str) -> String {
    content.chars().take(UNTERMINATED_HEAD_LEN).collect()
}
