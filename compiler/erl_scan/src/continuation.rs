//! The step protocol: input chunks in, tokens or a continuation out.

use std::fmt;

use crate::location::{Column, Line, Location};
use crate::options::ScannerOptions;
use crate::scan_error::ScanError;
use crate::scanner::{Scanner, SubState};
use crate::token::Token;

/// Input handed to one scan step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input<'a> {
    /// The next chunk of source text.
    Chunk(&'a str),
    /// No more input will ever arrive.
    Eof,
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(chunk: &'a str) -> Self {
        Input::Chunk(chunk)
    }
}

/// Input left over after a finished step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Remaining {
    /// Unconsumed text, to be fed to the next scan.
    Text(String),
    /// Everything was consumed and end of input was reached.
    Eof,
}

/// Result of a finished step.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Tokens of one form (ending with a `dot`), or the trailing tokens
    /// before end of input.
    Ok { tokens: Vec<Token>, end: Location },
    /// End of input with no tokens.
    Eof(Location),
    /// A lexical error. `end` is where the offending text ends.
    Error { error: ScanError, end: Location },
}

/// Result of one scan step.
#[derive(Debug)]
pub enum ScanResult {
    Done { outcome: Outcome, rest: Remaining },
    /// The chunk ran out; resume with more input or [`Input::Eof`].
    More(Continuation),
}

impl ScanResult {
    /// The finished outcome, if any.
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            ScanResult::Done { outcome, .. } => Some(outcome),
            ScanResult::More(_) => None,
        }
    }
}

/// Opaque snapshot of an in-progress scan.
///
/// Holds everything needed to carry on: the undecided tail of the input,
/// the position, the tokens produced so far, the options the scan started
/// with, and the state of the literal scanner that ran out of input.
/// Resuming is the same as having received the old tail and the new chunk
/// as one piece of text.
pub struct Continuation {
    pub(crate) pending: String,
    pub(crate) line: Line,
    pub(crate) col: Column,
    pub(crate) tokens: Vec<Token>,
    pub(crate) options: ScannerOptions,
    pub(crate) state: SubState,
    pub(crate) in_check: bool,
}

impl Continuation {
    /// Continue the scan with the next chunk, or with [`Input::Eof`].
    pub fn resume(self, input: Input<'_>) -> ScanResult {
        tracing::trace!(
            state = self.state.tag(),
            pending = self.pending.len(),
            "resuming scan"
        );
        let (scanner, state) = Scanner::resume(self, input);
        scanner.run(state)
    }

    /// Where scanning stopped (the start of the pending tail).
    pub fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.col,
        }
    }

    /// Input not yet consumed because the lexeme there is undecided.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Tokens produced since the current form started.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    /// Name of the scanner that will be re-entered on resumption.
    pub fn state(&self) -> &'static str {
        self.state.tag()
    }
}

impl fmt::Debug for Continuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Continuation")
            .field("location", &self.location())
            .field("state", &self.state.tag())
            .field("pending", &self.pending)
            .field("tokens", &self.tokens.len())
            .field("in_check", &self.in_check)
            .finish_non_exhaustive()
    }
}
