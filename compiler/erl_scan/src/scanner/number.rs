//! Integer and float literals.
//!
//! `_` may separate two digits. A based integer is `Base#Digits` with the
//! base in 2..=36. A float needs a `.` followed by a digit, optionally
//! followed by an exponent.

use num_bigint::BigUint;

use crate::char_class::{digit_value, is_digit};
use crate::location::Location;
use crate::scan_error::{IllegalKind, ScanError, ScanErrorKind};
use crate::token::{TokenKind, Value};

use super::{Scanner, Step, Stop, SubState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Decimal digits; may still turn into a base or a float.
    Integer,
    /// Digits after `Base#`.
    Based(u32),
    /// Digits after the decimal point.
    Fraction,
    /// Right after `e`/`E`.
    ExponentSign,
    Exponent,
}

impl Phase {
    fn radix(self) -> u32 {
        match self {
            Phase::Based(base) => base,
            _ => 10,
        }
    }

    fn illegal(self) -> IllegalKind {
        match self {
            Phase::Integer | Phase::Based(_) => IllegalKind::Integer,
            Phase::Fraction | Phase::ExponentSign | Phase::Exponent => IllegalKind::Float,
        }
    }
}

/// A number being accumulated, possibly across chunks.
pub(crate) struct NumberState {
    start: Location,
    /// Source text so far.
    text: String,
    /// Digits of the current phase without separators. For floats, the
    /// whole literal in a form `f64::from_str` accepts.
    digits: String,
    phase: Phase,
    /// A digit has been read since the phase began.
    seen_digit: bool,
}

impl Scanner<'_> {
    pub(super) fn start_number(&self) -> SubState {
        SubState::Number(NumberState {
            start: self.here(),
            text: String::new(),
            digits: String::new(),
            phase: Phase::Integer,
            seen_digit: false,
        })
    }

    fn take(&mut self, st: &mut NumberState, c: char) {
        self.cursor.advance();
        self.bump(1);
        st.text.push(c);
    }

    pub(super) fn number(&mut self, mut st: NumberState) -> Step {
        loop {
            let Some(c) = self.cursor.current() else {
                if self.cursor.eof_signalled() {
                    return self.finish_number(st);
                }
                return Step::Suspend(SubState::Number(st));
            };
            let eof = self.cursor.eof_signalled();
            let in_digits = matches!(
                st.phase,
                Phase::Integer | Phase::Based(_) | Phase::Fraction | Phase::Exponent
            );

            if in_digits && digit_value(c, st.phase.radix()).is_some() {
                self.take(&mut st, c);
                st.digits.push(c);
                st.seen_digit = true;
                continue;
            }

            if c == '_' && in_digits && st.seen_digit {
                match self.cursor.peek() {
                    None if !eof => return Step::Suspend(SubState::Number(st)),
                    Some(d) if digit_value(d, st.phase.radix()).is_some() => {
                        self.take(&mut st, c);
                        self.take(&mut st, d);
                        st.digits.push(d);
                        continue;
                    }
                    _ => {
                        // the error covers the whole run of separators
                        let rest = self.cursor.rest();
                        let run = rest.bytes().take_while(|&b| b == b'_').count();
                        if run == rest.len() && !eof {
                            return Step::Suspend(SubState::Number(st));
                        }
                        self.consume(run);
                        return self.fail(ScanError::illegal(st.start, st.phase.illegal()));
                    }
                }
            }

            match (st.phase, c) {
                (Phase::Integer, '.') => match self.cursor.peek() {
                    None if !eof => return Step::Suspend(SubState::Number(st)),
                    Some(d) if is_digit(d) => {
                        self.take(&mut st, c);
                        self.take(&mut st, d);
                        st.digits.push(c);
                        st.digits.push(d);
                        st.phase = Phase::Fraction;
                    }
                    _ => return self.finish_number(st),
                },
                (Phase::Integer, '#') => {
                    let base = st.digits.parse::<u32>().ok().filter(|b| (2..=36).contains(b));
                    let Some(base) = base else {
                        return self.illegal_base(&st);
                    };
                    self.take(&mut st, c);
                    st.digits.clear();
                    st.seen_digit = false;
                    st.phase = Phase::Based(base);
                }
                (Phase::Fraction, 'e' | 'E') => {
                    self.take(&mut st, c);
                    st.digits.push(c);
                    st.seen_digit = false;
                    st.phase = Phase::ExponentSign;
                }
                (Phase::ExponentSign, '+' | '-') => {
                    self.take(&mut st, c);
                    st.digits.push(c);
                    st.phase = Phase::Exponent;
                }
                (Phase::ExponentSign, _) => st.phase = Phase::Exponent,
                _ => return self.finish_number(st),
            }
        }
    }

    /// The base before `#` is out of range. The `#` is left unconsumed.
    #[cold]
    fn illegal_base(&self, st: &NumberState) -> Step {
        let trimmed = st.digits.trim_start_matches('0');
        let base = if trimmed.is_empty() { "0" } else { trimmed };
        let error = ScanError::new(st.start, ScanErrorKind::IllegalBase(base.to_owned()));
        Step::Stop(Stop::Error {
            error,
            end: self.here(),
        })
    }

    fn finish_number(&mut self, st: NumberState) -> Step {
        let NumberState {
            start,
            text,
            digits,
            phase,
            seen_digit,
        } = st;

        let (kind, value) = match phase {
            Phase::Integer | Phase::Based(_) => {
                match BigUint::parse_bytes(digits.as_bytes(), phase.radix()) {
                    Some(n) if seen_digit => (TokenKind::Integer, Value::Integer(n)),
                    _ => return self.fail(ScanError::illegal(start, IllegalKind::Integer)),
                }
            }
            Phase::Fraction | Phase::ExponentSign | Phase::Exponent => {
                let parsed = digits.parse::<f64>().ok().filter(|x| x.is_finite());
                match parsed {
                    Some(x) if phase == Phase::Fraction || seen_digit => {
                        (TokenKind::Float, Value::Float(x))
                    }
                    _ => return self.fail(ScanError::illegal(start, IllegalKind::Float)),
                }
            }
        };
        let text = self.options.capture_text.then_some(text);
        self.emit(kind, start, Some(value), text);
        Step::Next(SubState::Dispatch)
    }
}
