//! Triple-quoted strings.
//!
//! A run of three or more `"` opens the string; the rest of the opening line
//! must be whitespace. The string ends at the first line consisting of
//! inline whitespace and exactly as many `"` as the opening run. That
//! closing line's whitespace is the indentation every content line must
//! start with; it is stripped from each line.
//!
//! Lines are kept raw until the closing line is found, because only then is
//! the indentation known. Layout checks and escape decoding (for `~s` and
//! `~b` sigils) run once, in [`Scanner::finish_triple_quoted`].

use crate::char_class::{is_inline_whitespace, is_text_char, is_whitespace};
use crate::escape;
use crate::location::{advance_column, reset_column, Line, Location};
use crate::scan_error::{unterminated_head, IllegalKind, ScanError, ScanErrorKind};
use crate::token::{TokenKind, Value};

use super::quoted::Sigil;
use super::{Scanner, Step, Stop, SubState};

/// One content line, including its trailing `\n`.
struct ContentLine {
    line: Line,
    text: String,
}

pub(crate) struct TripleQuoteState {
    start: Location,
    /// Length of the opening quote run.
    quotes: usize,
    sigil: Option<Sigil>,
    verbatim: bool,
    /// Source text, when capturing text.
    pub(super) raw: String,
    /// Text after the opening quotes, before the first newline.
    opening: String,
    opening_done: bool,
    lines: Vec<ContentLine>,
    /// The line being read. Becomes the indentation if it turns out to be
    /// the closing line.
    current: String,
    current_line: Line,
}

impl TripleQuoteState {
    pub(super) fn new(start: Location, quotes: usize, sigil: Option<Sigil>, verbatim: bool) -> Self {
        Self {
            start,
            quotes,
            sigil,
            verbatim,
            raw: String::new(),
            opening: String::new(),
            opening_done: false,
            lines: Vec::new(),
            current: String::new(),
            current_line: start.line,
        }
    }

    fn content_head(&self) -> String {
        let mut content: String = self.lines.iter().map(|l| l.text.as_str()).collect();
        content.push_str(&self.current);
        unterminated_head(&content)
    }
}

impl Scanner<'_> {
    pub(super) fn triple_quoted(&mut self, mut st: Box<TripleQuoteState>) -> Step {
        let capture = self.options.capture_text;
        loop {
            let Some(c) = self.cursor.current() else {
                if self.cursor.eof_signalled() {
                    let head = st.content_head();
                    let kind = match st.sigil {
                        Some(_) => ScanErrorKind::UnterminatedSigil { head },
                        None => ScanErrorKind::UnterminatedTripleQuoted { head },
                    };
                    return self.fail(ScanError::new(st.start, kind));
                }
                return Step::Suspend(SubState::TripleQuoted(st));
            };
            if !is_text_char(c) {
                return self.illegal_character();
            }

            if !st.opening_done {
                self.cursor.advance();
                if capture {
                    st.raw.push(c);
                }
                if c == '\n' {
                    self.newline();
                    st.opening_done = true;
                    st.current_line = self.line;
                } else {
                    self.bump(1);
                    st.opening.push(c);
                }
                continue;
            }

            if c == '"' && st.current.chars().all(is_inline_whitespace) {
                let rest = self.cursor.rest();
                let run = rest.bytes().take_while(|&b| b == b'"').count();
                if run == rest.len() && !self.cursor.eof_signalled() {
                    return Step::Suspend(SubState::TripleQuoted(st));
                }
                self.cursor.advance_n(run);
                self.bump(run);
                let quotes = "\"".repeat(run);
                if capture {
                    st.raw.push_str(&quotes);
                }
                if run == st.quotes {
                    return self.finish_triple_quoted(*st);
                }
                // More or fewer quotes than the opening run: content.
                st.current.push_str(&quotes);
                continue;
            }

            self.cursor.advance();
            if capture {
                st.raw.push(c);
            }
            st.current.push(c);
            if c == '\n' {
                let text = std::mem::take(&mut st.current);
                st.lines.push(ContentLine {
                    line: st.current_line,
                    text,
                });
                self.newline();
                st.current_line = self.line;
            } else {
                self.bump(1);
            }
        }
    }

    fn finish_triple_quoted(&mut self, st: TripleQuoteState) -> Step {
        let TripleQuoteState {
            start,
            quotes,
            sigil,
            verbatim,
            raw,
            opening,
            lines,
            current: indent,
            ..
        } = st;

        // Opening line: whitespace only.
        if let Some(idx) = opening.chars().position(|c| !is_inline_whitespace(c)) {
            let location = Location {
                line: start.line,
                column: advance_column(start.column, quotes + idx),
            };
            return layout_error(location, ScanErrorKind::WhiteSpace, 1);
        }

        // Indentation, checked from the last line up; the first offending
        // line wins.
        let indent_width = indent.chars().count();
        let mut stripped = Vec::with_capacity(lines.len());
        let mut bad_line = None;
        for line in lines.iter().rev() {
            if let Some(rest) = line.text.strip_prefix(indent.as_str()) {
                stripped.push(rest);
            } else if line.text.chars().all(is_whitespace) {
                stripped.push("\n");
            } else {
                let idx = line
                    .text
                    .chars()
                    .zip(indent.chars())
                    .position(|(a, b)| a != b)
                    .unwrap_or(0);
                bad_line = Some((line.line, idx));
            }
        }
        if let Some((line, idx)) = bad_line {
            let location = Location {
                line,
                column: reset_column(self.col, count(idx + 1)),
            };
            return layout_error(location, ScanErrorKind::Indentation, 1);
        }
        stripped.reverse();

        let mut value = String::new();
        if verbatim {
            value.extend(stripped.iter().copied());
        } else {
            for (text, line) in stripped.iter().zip(&lines) {
                match escape::decode_all(text) {
                    Ok(decoded) => value.push_str(&decoded),
                    Err((offset, len)) => {
                        let location = Location {
                            line: line.line,
                            column: reset_column(self.col, count(indent_width + offset + 1)),
                        };
                        return layout_error(location, ScanErrorKind::illegal(IllegalKind::Character), len);
                    }
                }
            }
        }
        // Several content lines: the last line break belongs to the layout.
        if lines.len() > 1 && value.ends_with('\n') {
            value.pop();
        }

        let text = self.options.capture_text.then_some(raw);
        self.emit(TokenKind::String, start, Some(Value::String(value)), text);
        Step::Next(self.after_sigil_string(sigil, false))
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Error inside a triple-quoted string, spanning `width` characters.
#[cold]
fn layout_error(location: Location, kind: ScanErrorKind, width: usize) -> Step {
    let end = Location {
        line: location.line,
        column: advance_column(location.column, width),
    };
    Step::Stop(Stop::Error {
        error: ScanError::new(location, kind),
        end,
    })
}
