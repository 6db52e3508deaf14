//! Atoms, variables and sigil names.

use crate::char_class::is_name_continue;
use crate::location::Location;
use crate::scan_error::{IllegalKind, ScanError};
use crate::token::{TokenKind, Value};

use super::{Scanner, Sigil, Step, SubState};

/// Longest atom or variable name, in characters.
pub(crate) const MAX_NAME_LEN: usize = 255;

/// What a run of name characters becomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NameKind {
    Atom,
    Var,
    /// The name after `~`. Decides escape handling of the sigil string.
    SigilPrefix,
    /// The name right after a sigil string's closing delimiter.
    /// `check_adjacent` is set after a `"`-delimited single-line string.
    SigilSuffix { check_adjacent: bool },
}

/// A name being accumulated, possibly across chunks.
pub(crate) struct NameState {
    start: Location,
    kind: NameKind,
    name: String,
}

impl NameState {
    pub(crate) fn new(start: Location, kind: NameKind) -> Self {
        Self {
            start,
            kind,
            name: String::new(),
        }
    }
}

impl Scanner<'_> {
    pub(super) fn start_name(&self, kind: NameKind) -> SubState {
        SubState::Name(NameState::new(self.here(), kind))
    }

    /// `~` followed by an optional name.
    pub(super) fn sigil_prefix(&mut self) -> Step {
        let start = self.here();
        self.cursor.advance();
        self.bump(1);
        Step::Next(SubState::Name(NameState::new(start, NameKind::SigilPrefix)))
    }

    pub(super) fn name(&mut self, mut st: NameState) -> Step {
        let from = self.cursor.pos();
        let mut count = 0;
        while let Some(c) = self.cursor.current() {
            if !is_name_continue(c) {
                break;
            }
            self.cursor.advance();
            count += 1;
        }
        st.name.push_str(self.cursor.slice_from(from));
        self.bump(count);

        if self.cursor.needs_more() {
            return Step::Suspend(SubState::Name(st));
        }
        self.finish_name(st)
    }

    fn finish_name(&mut self, st: NameState) -> Step {
        let NameState { start, kind, name } = st;
        if name.chars().count() > MAX_NAME_LEN {
            let what = match kind {
                NameKind::Atom => IllegalKind::Atom,
                NameKind::Var => IllegalKind::Var,
                NameKind::SigilPrefix => IllegalKind::SigilPrefix,
                NameKind::SigilSuffix { .. } => IllegalKind::SigilSuffix,
            };
            return self.fail(ScanError::illegal(start, what));
        }

        match kind {
            NameKind::Atom => {
                let text = self.text(&name);
                if self.options.is_reserved(&name) {
                    self.emit(TokenKind::Reserved(name), start, None, text);
                } else {
                    self.emit(TokenKind::Atom, start, Some(Value::Name(name)), text);
                }
                Step::Next(SubState::Dispatch)
            }
            NameKind::Var => {
                let text = self.text(&name);
                self.emit(TokenKind::Var, start, Some(Value::Name(name)), text);
                Step::Next(SubState::Dispatch)
            }
            NameKind::SigilPrefix => {
                let text = self.options.capture_text.then(|| format!("~{name}"));
                // Only `~s` and `~b` decode escapes.
                let verbatim = !matches!(name.as_str(), "s" | "b");
                self.emit(TokenKind::SigilPrefix, start, Some(Value::Name(name)), text);
                Step::Next(SubState::SigilDelimiter(Sigil { start, verbatim }))
            }
            NameKind::SigilSuffix { check_adjacent } => {
                let text = self.text(&name);
                let empty = name.is_empty();
                self.emit(TokenKind::SigilSuffix, start, Some(Value::Name(name)), text);
                if empty && check_adjacent {
                    Step::Next(SubState::AfterString)
                } else {
                    Step::Next(SubState::Dispatch)
                }
            }
        }
    }
}
