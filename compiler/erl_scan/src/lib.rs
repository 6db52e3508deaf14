//! Incremental, resumable tokenizer for Erlang source text.
//!
//! Source arrives in chunks of arbitrary size. Each call to [`scan`] either
//! finishes (a form ended with a `dot`, input ended, or a lexical error was
//! found) or returns a [`Continuation`] that picks up exactly where the
//! chunk ran out. Splitting the input differently never changes the result.
//!
//! ```
//! use erl_scan::{scan, Input, Location, Outcome, ScanResult, ScannerOptions};
//!
//! let options = ScannerOptions::new();
//! let first = scan(None, Input::Chunk("foo(X) -"), Location::with_column(1, 1), &options);
//! let ScanResult::More(cont) = first else { unreachable!() };
//! let ScanResult::Done { outcome, .. } = cont.resume(Input::Chunk("> X + 1.\n")) else {
//!     unreachable!()
//! };
//! let Outcome::Ok { tokens, end } = outcome else { unreachable!() };
//! assert_eq!(tokens.len(), 9);
//! assert_eq!(end, Location::with_column(2, 1));
//! ```
//!
//! # Columns
//!
//! Column tracking is chosen once per scan by the start location: a bare
//! line ([`Location::line`]) disables it, [`Location::with_column`] enables
//! it.
//!
//! # Whole texts
//!
//! [`scan_str`] scans a complete text to one token list, and [`Forms`]
//! splits a complete text into per-form token lists.

mod char_class;
mod continuation;
mod cursor;
mod escape;
mod keywords;
mod location;
mod options;
mod scan_error;
mod scanner;
mod token;

pub use char_class::{
    is_inline_whitespace, is_letter, is_lowercase_letter, is_uppercase_letter,
    is_valid_character, is_valid_scalar, is_whitespace,
};
pub use continuation::{Continuation, Input, Outcome, Remaining, ScanResult};
pub use keywords::{is_fixed_keyword, ReservedPredicate, ReservedWords};
pub use location::{Column, Line, Location};
pub use options::ScannerOptions;
pub use scan_error::{IllegalKind, ScanError, ScanErrorKind};
pub use token::{Anno, Punct, Token, TokenKind, Value};

use scanner::{Scanner, SubState};

/// Scan one step.
///
/// Pass `None` to start a new scan at `start` with `options`; pass a
/// continuation to resume one, in which case `start` and `options` are
/// ignored and the continuation's own are used.
///
/// Returns [`ScanResult::Done`] after each form's `dot`, at end of input, or
/// on the first error, and [`ScanResult::More`] when the chunk ran out.
pub fn scan(
    continuation: Option<Continuation>,
    input: Input<'_>,
    start: impl Into<Location>,
    options: &ScannerOptions,
) -> ScanResult {
    match continuation {
        Some(cont) => cont.resume(input),
        None => Scanner::start(input, start.into(), options.clone()).run(SubState::Dispatch),
    }
}

/// Scan a complete text into tokens, across form boundaries.
///
/// Returns the tokens and the end location, or the first error and where the
/// offending text ends.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn scan_str(
    text: &str,
    start: impl Into<Location>,
    options: &ScannerOptions,
) -> Result<(Vec<Token>, Location), (ScanError, Location)> {
    let start = start.into();
    let (outcome, _) = Scanner::new(text, true, start, options.clone(), false).run_to_end();
    match outcome {
        Outcome::Ok { tokens, end } => {
            tracing::debug!(tokens = tokens.len(), %end, "scanned text");
            Ok((tokens, end))
        }
        Outcome::Eof(end) => Ok((Vec::new(), end)),
        Outcome::Error { error, end } => Err((error, end)),
    }
}

/// Iterator over the forms of a complete text.
///
/// Yields each form's tokens (ending with its `dot`, except possibly the
/// last), or the error that ended a form. Scanning continues after an error
/// with the unconsumed input, the way a preprocessor drives the scanner.
///
/// ```
/// use erl_scan::{Forms, Location, ScannerOptions};
///
/// let options = ScannerOptions::new();
/// let forms: Vec<_> = Forms::new("a. 37#1. b.", Location::line(1), &options).collect();
/// // `37#` is an illegal base; scanning resumes at the `#`
/// assert_eq!(forms.len(), 4);
/// assert!(forms[1].is_err());
/// ```
#[derive(Debug)]
pub struct Forms<'a> {
    text: &'a str,
    /// Byte offset of the next form in `text`.
    offset: usize,
    location: Location,
    options: &'a ScannerOptions,
    done: bool,
}

impl<'a> Forms<'a> {
    pub fn new(text: &'a str, start: impl Into<Location>, options: &'a ScannerOptions) -> Self {
        Self {
            text,
            offset: 0,
            location: start.into(),
            options,
            done: false,
        }
    }

    /// Where the next form starts.
    pub fn location(&self) -> Location {
        self.location
    }

    /// Scan the next form, reporting the full outcome including where an
    /// error's offending text ends. Returns `None` once the text is used up.
    pub fn next_outcome(&mut self) -> Option<Outcome> {
        if self.done {
            return None;
        }
        let rest = &self.text[self.offset..];
        let scanner = Scanner::new(rest, true, self.location, self.options.clone(), true);
        let (outcome, consumed) = scanner.run_to_end();
        self.offset += consumed;
        self.done = self.offset == self.text.len() || matches!(outcome, Outcome::Eof(_));
        self.location = match &outcome {
            Outcome::Ok { end, .. } | Outcome::Error { end, .. } | Outcome::Eof(end) => *end,
        };
        Some(outcome)
    }
}

impl Iterator for Forms<'_> {
    type Item = Result<Vec<Token>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_outcome()? {
            Outcome::Ok { tokens, .. } => Some(Ok(tokens)),
            Outcome::Eof(_) => None,
            Outcome::Error { error, .. } => Some(Err(error)),
        }
    }
}
