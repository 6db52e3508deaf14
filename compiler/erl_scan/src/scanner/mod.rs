//! The resumable scanner.
//!
//! # Design
//!
//! A scan step builds a [`Scanner`] over the pending tail of the previous
//! step plus the new chunk, then runs a small state machine. Every state is
//! a focused method that consumes input and returns a [`Step`]:
//!
//! - `Next(state)`: carry on with `state`
//! - `Suspend(state)`: the chunk ran out before the lexeme was decided;
//!   package the scan into a [`Continuation`] that re-enters `state`
//! - `Stop(..)`: a form ended, input ended, or an error occurred
//!
//! Short lexemes (operators, dots, character literals, quote runs) are never
//! split across steps: an undecided one is not consumed, so it stays in the
//! pending tail and is scanned again from its start once more input arrives.
//! Literals of unbounded length (names, numbers, strings) keep their partial
//! value in their state instead, so resumption never rescans them.

mod name;
mod number;
mod quoted;
mod triple_quote;

use crate::char_class::{
    is_atom_start, is_digit, is_text_char, is_var_start, is_whitespace,
};
use crate::continuation::{Continuation, Input, Outcome, Remaining, ScanResult};
use crate::cursor::Cursor;
use crate::escape::{self, Escape};
use crate::location::{advance_column, reset_column, Column, Line, Location};
use crate::options::ScannerOptions;
use crate::scan_error::{IllegalKind, ScanError, ScanErrorKind};
use crate::token::{Punct, Token, TokenKind, Value};

pub(crate) use name::{NameKind, NameState};
pub(crate) use number::NumberState;
pub(crate) use quoted::{QuotedState, Sigil};
pub(crate) use triple_quote::TripleQuoteState;

/// Marker opening a compiler check annotation.
const CHECK_MARKER: &str = "%ssa%";

/// Which scanner runs next.
pub(crate) enum SubState {
    /// Between tokens.
    Dispatch,
    /// Inside a `%` comment.
    Comment,
    Name(NameState),
    Number(NumberState),
    /// Inside a single-line string, quoted atom or sigil string.
    Quoted(QuotedState),
    /// Right after a `"` string; a directly following `"` is an error.
    AfterString,
    /// After a sigil prefix, expecting the opening delimiter.
    SigilDelimiter(Sigil),
    TripleQuoted(Box<TripleQuoteState>),
}

impl SubState {
    pub(crate) fn tag(&self) -> &'static str {
        match self {
            SubState::Dispatch => "dispatch",
            SubState::Comment => "comment",
            SubState::Name(_) => "name",
            SubState::Number(_) => "number",
            SubState::Quoted(_) => "quoted",
            SubState::AfterString => "after_string",
            SubState::SigilDelimiter(_) => "sigil_delimiter",
            SubState::TripleQuoted(_) => "triple_quoted",
        }
    }
}

/// Result of running one state.
pub(crate) enum Step {
    Next(SubState),
    Suspend(SubState),
    Stop(Stop),
}

/// How running the states ended.
enum Halt {
    Suspend(SubState),
    Stop(Stop),
}

/// Why a step finished.
pub(crate) enum Stop {
    /// A `dot` was emitted.
    Form,
    /// Input ended.
    Eof,
    Error { error: ScanError, end: Location },
}

/// One scan step's working state.
pub(crate) struct Scanner<'a> {
    cursor: Cursor<'a>,
    line: Line,
    col: Column,
    tokens: Vec<Token>,
    options: ScannerOptions,
    /// Between a `%ssa%` marker and its terminating `.`.
    in_check: bool,
    /// Finish the step at each `dot`. Whole-text scans keep going.
    stop_at_dot: bool,
}

fn split_input(input: Input<'_>) -> (&str, bool) {
    match input {
        Input::Chunk(chunk) => (chunk, false),
        Input::Eof => ("", true),
    }
}

impl<'a> Scanner<'a> {
    /// A fresh scan starting at `start`.
    pub(crate) fn new(
        text: &'a str,
        eof: bool,
        start: Location,
        options: ScannerOptions,
        stop_at_dot: bool,
    ) -> Self {
        Self {
            cursor: Cursor::new(String::new(), text, eof),
            line: start.line,
            col: start.column,
            tokens: Vec::new(),
            options,
            in_check: false,
            stop_at_dot,
        }
    }

    /// A fresh form-at-a-time scan fed with `input`.
    pub(crate) fn start(input: Input<'a>, start: Location, options: ScannerOptions) -> Self {
        let (chunk, eof) = split_input(input);
        Self::new(chunk, eof, start, options, true)
    }

    /// Rebuild the scanner from a continuation and the next input.
    pub(crate) fn resume(cont: Continuation, input: Input<'a>) -> (Self, SubState) {
        let (chunk, eof) = split_input(input);
        let scanner = Self {
            cursor: Cursor::new(cont.pending, chunk, eof),
            line: cont.line,
            col: cont.col,
            tokens: cont.tokens,
            options: cont.options,
            in_check: cont.in_check,
            stop_at_dot: true,
        };
        (scanner, cont.state)
    }

    /// Run states until the step finishes or suspends.
    pub(crate) fn run(mut self, state: SubState) -> ScanResult {
        match self.drive(state) {
            Halt::Suspend(next) => self.suspend(next),
            Halt::Stop(stop) => self.finish(stop),
        }
    }

    /// Run a scan over text that ends with end of input, returning the
    /// outcome and how many bytes of the text it consumed.
    pub(crate) fn run_to_end(mut self) -> (Outcome, usize) {
        debug_assert!(self.cursor.eof_signalled(), "complete text without end of input");
        let stop = match self.drive(SubState::Dispatch) {
            Halt::Stop(stop) => stop,
            Halt::Suspend(_) => Stop::Eof,
        };
        let consumed = self.cursor.pos();
        (self.outcome(stop), consumed)
    }

    fn drive(&mut self, mut state: SubState) -> Halt {
        loop {
            let step = match state {
                SubState::Dispatch => self.dispatch(),
                SubState::Comment => self.comment_body(),
                SubState::Name(st) => self.name(st),
                SubState::Number(st) => self.number(st),
                SubState::Quoted(st) => self.quoted(st),
                SubState::AfterString => self.after_string(),
                SubState::SigilDelimiter(sigil) => self.sigil_delimiter(sigil),
                SubState::TripleQuoted(st) => self.triple_quoted(st),
            };
            match step {
                Step::Next(next) => state = next,
                Step::Suspend(next) => return Halt::Suspend(next),
                Step::Stop(stop) => return Halt::Stop(stop),
            }
        }
    }

    fn suspend(self, state: SubState) -> ScanResult {
        debug_assert!(!self.cursor.eof_signalled(), "suspended after end of input");
        tracing::trace!(state = state.tag(), line = self.line, "scan suspended");
        ScanResult::More(Continuation {
            line: self.line,
            col: self.col,
            tokens: self.tokens,
            options: self.options,
            in_check: self.in_check,
            state,
            pending: self.cursor.into_rest(),
        })
    }

    fn finish(self, stop: Stop) -> ScanResult {
        let rest = if self.cursor.is_eof() {
            Remaining::Eof
        } else {
            Remaining::Text(self.cursor.rest().to_owned())
        };
        ScanResult::Done {
            outcome: self.outcome(stop),
            rest,
        }
    }

    fn outcome(self, stop: Stop) -> Outcome {
        let end = self.here();
        match stop {
            Stop::Form => Outcome::Ok {
                tokens: self.tokens,
                end,
            },
            Stop::Eof if self.tokens.is_empty() => Outcome::Eof(end),
            Stop::Eof => Outcome::Ok {
                tokens: self.tokens,
                end,
            },
            Stop::Error { error, end } => {
                tracing::debug!(%error, "scan error");
                Outcome::Error { error, end }
            }
        }
    }

    // ─── Position & emission ─────────────────────────────────────────────

    #[inline]
    fn here(&self) -> Location {
        Location {
            line: self.line,
            column: self.col,
        }
    }

    /// Advance the column over `n` characters on the current line.
    #[inline]
    fn bump(&mut self, n: usize) {
        self.col = advance_column(self.col, n);
    }

    #[inline]
    fn newline(&mut self) {
        self.line = self.line.saturating_add(1);
        self.col = reset_column(self.col, 1);
    }

    /// Consume `n` characters, counting any newlines among them.
    fn consume(&mut self, n: usize) {
        for _ in 0..n {
            match self.cursor.advance() {
                Some('\n') => self.newline(),
                Some(_) => self.bump(1),
                None => break,
            }
        }
    }

    /// Source text for an annotation, when text capture is on.
    #[inline]
    fn text(&self, source: &str) -> Option<String> {
        self.options.capture_text.then(|| source.to_owned())
    }

    fn emit(&mut self, kind: TokenKind, location: Location, value: Option<Value>, text: Option<String>) {
        self.tokens.push(Token::new(kind, location, value, text));
    }

    /// Stop with `error`, the offending text ending at the current position.
    #[cold]
    fn fail(&self, error: ScanError) -> Step {
        Step::Stop(Stop::Error {
            error,
            end: self.here(),
        })
    }

    /// Consume the character at the cursor and report it as illegal.
    #[cold]
    fn illegal_character(&mut self) -> Step {
        let location = self.here();
        self.consume(1);
        self.fail(ScanError::illegal(location, IllegalKind::Character))
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    fn dispatch(&mut self) -> Step {
        loop {
            let Some(c) = self.cursor.current() else {
                return if self.cursor.eof_signalled() {
                    Step::Stop(Stop::Eof)
                } else {
                    Step::Suspend(SubState::Dispatch)
                };
            };
            match c {
                '\n' => {
                    self.cursor.advance();
                    self.newline();
                }
                c if is_whitespace(c) => {
                    self.cursor.advance();
                    self.bump(1);
                }
                c if is_digit(c) => return Step::Next(self.start_number()),
                c if is_atom_start(c) => return Step::Next(self.start_name(NameKind::Atom)),
                c if is_var_start(c) => return Step::Next(self.start_name(NameKind::Var)),
                '"' => return self.quote_run(None),
                '\'' => return Step::Next(self.start_quoted_atom()),
                '$' => return self.char_literal(),
                '~' => return self.sigil_prefix(),
                '%' => return self.comment(),
                '.' => return self.dot(),
                c => return self.punctuation(c),
            }
        }
    }

    // ─── Comments & check annotations ────────────────────────────────────

    fn comment(&mut self) -> Step {
        if self.options.check_comments {
            if self.cursor.rest().starts_with(CHECK_MARKER) {
                return self.check_marker();
            }
            if !self.cursor.eof_signalled() && self.cursor.rest_is_proper_prefix_of(CHECK_MARKER) {
                return Step::Suspend(SubState::Dispatch);
            }
        }
        Step::Next(SubState::Comment)
    }

    fn comment_body(&mut self) -> Step {
        let skipped = self.cursor.eat_comment_text();
        self.bump(skipped);
        if self.cursor.needs_more() {
            Step::Suspend(SubState::Comment)
        } else {
            Step::Next(SubState::Dispatch)
        }
    }

    /// `%ssa%` opens a check annotation; inside one it is plain whitespace.
    fn check_marker(&mut self) -> Step {
        let location = self.here();
        let width = CHECK_MARKER.len();
        self.cursor.advance_n(width);
        self.bump(width);
        if !self.in_check {
            self.in_check = true;
            let text = self.text(CHECK_MARKER);
            self.emit(TokenKind::CheckComment, location, None, text);
        }
        Step::Next(SubState::Dispatch)
    }

    // ─── Dots ────────────────────────────────────────────────────────────

    fn dot(&mut self) -> Step {
        let rest = self.cursor.rest();
        if rest.starts_with("...") {
            return self.fixed(Punct::DotDotDot);
        }
        if !self.cursor.eof_signalled() && self.cursor.rest_is_proper_prefix_of("...") {
            return Step::Suspend(SubState::Dispatch);
        }
        if rest.starts_with("..") {
            return self.fixed(Punct::DotDot);
        }
        match self.cursor.peek() {
            None | Some('%') => self.end_of_form(),
            Some(c) if is_whitespace(c) => self.end_of_form(),
            Some(_) => self.fixed(Punct::Dot),
        }
    }

    /// A terminating `.`, together with the whitespace character after it.
    fn end_of_form(&mut self) -> Step {
        let start = self.cursor.pos();
        let location = self.here();
        self.cursor.advance();
        self.bump(1);
        match self.cursor.current() {
            Some('\n') => {
                self.cursor.advance();
                self.newline();
            }
            Some(c) if is_whitespace(c) => {
                self.cursor.advance();
                self.bump(1);
            }
            _ => {}
        }
        let text = self.text(self.cursor.slice_from(start));

        // Check mode comes first: its `.` closes the annotation, not the form.
        if self.in_check {
            self.in_check = false;
            self.emit(TokenKind::CheckEnd, location, None, text);
            return Step::Next(SubState::Dispatch);
        }
        self.emit(TokenKind::Dot, location, None, text);
        if self.stop_at_dot {
            Step::Stop(Stop::Form)
        } else {
            Step::Next(SubState::Dispatch)
        }
    }

    // ─── Operators & symbols ─────────────────────────────────────────────

    /// Emit a fixed operator whose text starts at the cursor.
    fn fixed(&mut self, punct: Punct) -> Step {
        let location = self.here();
        let width = punct.as_str().len();
        let start = self.cursor.pos();
        self.cursor.advance_n(width);
        self.bump(width);
        let text = self.text(self.cursor.slice_from(start));
        self.emit(TokenKind::Punct(punct), location, None, text);
        Step::Next(SubState::Dispatch)
    }

    fn punctuation(&mut self, c: char) -> Step {
        // `-` at the end of a chunk could still become `->` or `--`.
        if !self.cursor.eof_signalled()
            && Punct::TABLE
                .iter()
                .any(|(op, _)| self.cursor.rest_is_proper_prefix_of(op))
        {
            return Step::Suspend(SubState::Dispatch);
        }
        let rest = self.cursor.rest();
        if let Some(&(_, punct)) = Punct::TABLE.iter().find(|(op, _)| rest.starts_with(op)) {
            return self.fixed(punct);
        }
        if !is_text_char(c) {
            return self.illegal_character();
        }
        let location = self.here();
        self.cursor.advance();
        self.bump(1);
        let text = self.text(c.encode_utf8(&mut [0; 4]));
        self.emit(TokenKind::Symbol(c), location, None, text);
        Step::Next(SubState::Dispatch)
    }

    // ─── Character literals ──────────────────────────────────────────────

    /// `$c` or `$\escape`. Rescanned from the `$` when cut off by a chunk
    /// boundary.
    fn char_literal(&mut self) -> Step {
        let start = self.cursor.pos();
        let location = self.here();
        let eof = self.cursor.eof_signalled();

        let value = match self.cursor.peek() {
            None if eof => {
                self.consume(1);
                return self.fail(ScanError::new(location, ScanErrorKind::UnterminatedChar));
            }
            None => return Step::Suspend(SubState::Dispatch),
            Some('\\') => {
                // `$` and `\` are one byte each
                let after = &self.cursor.rest()[2..];
                match escape::decode(after, eof) {
                    Escape::Char { value, len } => {
                        self.consume(2 + len);
                        value
                    }
                    Escape::Newline => {
                        self.consume(3);
                        '\n'
                    }
                    Escape::NeedMore => return Step::Suspend(SubState::Dispatch),
                    Escape::Eof => {
                        let remaining = self.cursor.rest().chars().count();
                        self.consume(remaining);
                        return self.fail(ScanError::new(location, ScanErrorKind::UnterminatedChar));
                    }
                    Escape::Illegal { len } => {
                        self.consume(2 + len);
                        return self.fail(ScanError::illegal(location, IllegalKind::Character));
                    }
                }
            }
            Some(c) if is_text_char(c) => {
                self.consume(2);
                c
            }
            Some(_) => {
                self.consume(1);
                return self.illegal_character();
            }
        };
        let text = self.text(self.cursor.slice_from(start));
        self.emit(TokenKind::Char, location, Some(Value::Char(value)), text);
        Step::Next(SubState::Dispatch)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
