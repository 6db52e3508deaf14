//! Source locations and column arithmetic.
//!
//! A scan either tracks columns for every token or for none of them. The
//! choice is made once, from the start location handed to the scanner: a
//! bare line disables column tracking, a `(line, column)` pair enables it.
//! With tracking disabled the column helpers are identities, so the hot path
//! never does column arithmetic.

use std::fmt;

/// Line number. Legacy inputs may start at zero or negative lines.
pub type Line = i32;

/// Column state of a scan. `None` means column tracking is disabled.
pub type Column = Option<u32>;

/// A position in the source: a line and, when tracked, a 1-based column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub line: Line,
    pub column: Column,
}

impl Location {
    /// A location without column information.
    #[inline]
    pub const fn line(line: Line) -> Self {
        Self { line, column: None }
    }

    /// A location with a 1-based column.
    #[inline]
    pub const fn with_column(line: Line, column: u32) -> Self {
        Self {
            line,
            column: Some(column),
        }
    }

    /// Returns `true` if this location carries a column.
    #[inline]
    pub const fn has_column(&self) -> bool {
        self.column.is_some()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::line(1)
    }
}

impl From<Line> for Location {
    fn from(line: Line) -> Self {
        Self::line(line)
    }
}

impl From<(Line, u32)> for Location {
    fn from((line, column): (Line, u32)) -> Self {
        Self::with_column(line, column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(column) => write!(f, "{}:{}", self.line, column),
            None => write!(f, "{}", self.line),
        }
    }
}

/// Advance a column by `n` characters. Identity when tracking is disabled.
#[inline]
pub fn advance_column(col: Column, n: usize) -> Column {
    let n = u32::try_from(n).unwrap_or(u32::MAX);
    col.map(|c| c.saturating_add(n))
}

/// Replace a column, used at newlines. Identity when tracking is disabled.
#[inline]
pub fn reset_column(col: Column, new: u32) -> Column {
    col.map(|_| new)
}
