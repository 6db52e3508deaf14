//! Strings, quoted atoms and sigil strings.

use crate::char_class::is_text_char;
use crate::escape::{self, Escape};
use crate::location::Location;
use crate::scan_error::{unterminated_head, IllegalKind, ScanError, ScanErrorKind};
use crate::token::{TokenKind, Value};

use super::name::{NameKind, NameState, MAX_NAME_LEN};
use super::triple_quote::TripleQuoteState;
use super::{Scanner, Step, SubState};

/// A sigil whose prefix has been emitted.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Sigil {
    /// Location of the `~`.
    pub(super) start: Location,
    /// Escapes are kept as written.
    pub(super) verbatim: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QuotedKind {
    String,
    Atom,
    Sigil,
}

/// A single-line quoted literal being accumulated.
pub(crate) struct QuotedState {
    start: Location,
    kind: QuotedKind,
    close: char,
    verbatim: bool,
    value: String,
    /// Source text including the opening delimiter, when capturing text.
    raw: String,
}

/// Closing delimiter for a sigil's opening delimiter.
fn closing_delimiter(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        '<' => Some('>'),
        '/' | '|' | '#' | '`' | '\'' | '"' => Some(open),
        _ => None,
    }
}

impl Scanner<'_> {
    fn open_quoted(&mut self, kind: QuotedKind, close: char, verbatim: bool) -> SubState {
        let start = self.here();
        let mut raw = String::new();
        if self.options.capture_text {
            raw.push(self.cursor.current().unwrap_or(close));
        }
        self.cursor.advance();
        self.bump(1);
        SubState::Quoted(QuotedState {
            start,
            kind,
            close,
            verbatim,
            value: String::new(),
            raw,
        })
    }

    pub(super) fn start_quoted_atom(&mut self) -> SubState {
        self.open_quoted(QuotedKind::Atom, '\'', false)
    }

    /// A run of `"` opening a string: one for a plain string, two for an
    /// empty one, three or more for a triple-quoted string.
    ///
    /// The run is rescanned from its first quote when it reaches the end of
    /// the chunk.
    pub(super) fn quote_run(&mut self, sigil: Option<Sigil>) -> Step {
        let rest = self.cursor.rest();
        let run = rest.bytes().take_while(|&b| b == b'"').count();
        if run == rest.len() && !self.cursor.eof_signalled() {
            return Step::Suspend(match sigil {
                Some(sigil) => SubState::SigilDelimiter(sigil),
                None => SubState::Dispatch,
            });
        }

        let verbatim = sigil.is_some_and(|s| s.verbatim);
        match run {
            1 => {
                let kind = if sigil.is_some() {
                    QuotedKind::Sigil
                } else {
                    QuotedKind::String
                };
                Step::Next(self.open_quoted(kind, '"', verbatim))
            }
            2 => {
                let location = self.here();
                self.cursor.advance_n(2);
                self.bump(2);
                let text = self.text("\"\"");
                self.emit(TokenKind::String, location, Some(Value::String(String::new())), text);
                Step::Next(self.after_sigil_string(sigil, true))
            }
            _ => {
                let location = self.here();
                self.cursor.advance_n(run);
                self.bump(run);
                // Plain triple-quoted strings are always verbatim.
                let verbatim = sigil.is_none() || verbatim;
                let mut st = TripleQuoteState::new(location, run, sigil, verbatim);
                if self.options.capture_text {
                    st.raw.push_str(&"\"".repeat(run));
                }
                Step::Next(SubState::TripleQuoted(Box::new(st)))
            }
        }
    }

    /// What follows a finished string: the suffix name for a sigil, or the
    /// adjacency check for a plain string.
    pub(super) fn after_sigil_string(&self, sigil: Option<Sigil>, check_adjacent: bool) -> SubState {
        match sigil {
            Some(_) => SubState::Name(NameState::new(
                self.here(),
                NameKind::SigilSuffix { check_adjacent },
            )),
            None if check_adjacent => SubState::AfterString,
            None => SubState::Dispatch,
        }
    }

    pub(super) fn sigil_delimiter(&mut self, sigil: Sigil) -> Step {
        let Some(open) = self.cursor.current() else {
            if self.cursor.eof_signalled() {
                let error = ScanError::new(
                    sigil.start,
                    ScanErrorKind::UnterminatedSigil {
                        head: String::new(),
                    },
                );
                return self.fail(error);
            }
            return Step::Suspend(SubState::SigilDelimiter(sigil));
        };
        if open == '"' {
            return self.quote_run(Some(sigil));
        }
        match closing_delimiter(open) {
            Some(close) => Step::Next(self.open_quoted(QuotedKind::Sigil, close, sigil.verbatim)),
            None => {
                let location = self.here();
                self.consume(1);
                self.fail(ScanError::illegal(location, IllegalKind::String))
            }
        }
    }

    pub(super) fn quoted(&mut self, mut st: QuotedState) -> Step {
        let capture = self.options.capture_text;
        loop {
            let from = self.cursor.pos();
            let mut count = 0;
            while let Some(c) = self.cursor.current() {
                if c == st.close || c == '\n' || (c == '\\' && !st.verbatim) || !is_text_char(c) {
                    break;
                }
                self.cursor.advance();
                count += 1;
            }
            let segment = self.cursor.slice_from(from);
            st.value.push_str(segment);
            if capture {
                st.raw.push_str(segment);
            }
            self.bump(count);

            let Some(c) = self.cursor.current() else {
                if self.cursor.eof_signalled() {
                    return self.unterminated_quoted(&st);
                }
                return Step::Suspend(SubState::Quoted(st));
            };

            match c {
                c if c == st.close => {
                    self.cursor.advance();
                    self.bump(1);
                    if capture {
                        st.raw.push(c);
                    }
                    return self.finish_quoted(st);
                }
                '\n' => {
                    self.cursor.advance();
                    self.newline();
                    st.value.push('\n');
                    if capture {
                        st.raw.push('\n');
                    }
                }
                '\\' if !st.verbatim => {
                    let location = self.here();
                    let eof = self.cursor.eof_signalled();
                    let span = match escape::decode(&self.cursor.rest()[1..], eof) {
                        Escape::Char { value, len } => {
                            st.value.push(value);
                            1 + len
                        }
                        Escape::Newline => {
                            st.value.push('\n');
                            2
                        }
                        Escape::NeedMore => return Step::Suspend(SubState::Quoted(st)),
                        Escape::Eof => {
                            let remaining = self.cursor.rest().chars().count();
                            self.consume(remaining);
                            return self.unterminated_quoted(&st);
                        }
                        Escape::Illegal { len } => {
                            self.consume(1 + len);
                            return self.fail(ScanError::illegal(location, IllegalKind::Character));
                        }
                    };
                    let from = self.cursor.pos();
                    self.consume(span);
                    if capture {
                        st.raw.push_str(self.cursor.slice_from(from));
                    }
                }
                _ => return self.illegal_character(),
            }
        }
    }

    #[cold]
    fn unterminated_quoted(&self, st: &QuotedState) -> Step {
        let head = unterminated_head(&st.value);
        let kind = match st.kind {
            QuotedKind::String => ScanErrorKind::UnterminatedString { head },
            QuotedKind::Atom => ScanErrorKind::UnterminatedAtom { head },
            QuotedKind::Sigil => ScanErrorKind::UnterminatedSigil { head },
        };
        self.fail(ScanError::new(st.start, kind))
    }

    fn finish_quoted(&mut self, st: QuotedState) -> Step {
        let QuotedState {
            start,
            kind,
            close,
            value,
            raw,
            ..
        } = st;
        let text = self.options.capture_text.then_some(raw);
        match kind {
            QuotedKind::Atom => {
                if value.chars().count() > MAX_NAME_LEN {
                    return self.fail(ScanError::illegal(start, IllegalKind::Atom));
                }
                // Quoted atoms are never reserved words.
                self.emit(TokenKind::Atom, start, Some(Value::Name(value)), text);
                Step::Next(SubState::Dispatch)
            }
            QuotedKind::String => {
                self.emit(TokenKind::String, start, Some(Value::String(value)), text);
                Step::Next(SubState::AfterString)
            }
            QuotedKind::Sigil => {
                self.emit(TokenKind::String, start, Some(Value::String(value)), text);
                Step::Next(SubState::Name(NameState::new(
                    self.here(),
                    NameKind::SigilSuffix {
                        check_adjacent: close == '"',
                    },
                )))
            }
        }
    }

    /// A `"` directly after a string literal.
    pub(super) fn after_string(&mut self) -> Step {
        match self.cursor.current() {
            None if !self.cursor.eof_signalled() => Step::Suspend(SubState::AfterString),
            Some('"') => {
                let location = self.here();
                self.consume(1);
                self.fail(ScanError::new(location, ScanErrorKind::StringConcat))
            }
            _ => Step::Next(SubState::Dispatch),
        }
    }
}
