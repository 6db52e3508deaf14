//! Reserved word resolution.
//!
//! Two tables:
//! 1. **Fixed keywords**: length-bucketed lookup, always reserved
//! 2. **Feature keywords**: words reserved only when the language feature
//!    introducing them is enabled for this scan (e.g. `maybe`/`else`)
//!
//! Feature keywords are passed in explicitly through
//! [`ScannerOptions`](crate::ScannerOptions); there is no process-wide
//! registry.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

/// Returns `true` if `text` is one of the fixed reserved words.
///
/// Uses length-bucketing for fast rejection: all keywords are 2-7 chars and
/// start with a lowercase ASCII letter.
#[inline]
pub fn is_fixed_keyword(text: &str) -> bool {
    let len = text.len();
    if !(2..=7).contains(&len) || !text.as_bytes()[0].is_ascii_lowercase() {
        return false;
    }

    match len {
        2 => matches!(text, "if" | "of" | "or"),
        3 => matches!(
            text,
            "and" | "bor" | "bsl" | "bsr" | "div" | "end" | "fun" | "let" | "not" | "rem" | "try"
                | "xor"
        ),
        4 => matches!(text, "band" | "bnot" | "bxor" | "case" | "cond" | "when"),
        5 => matches!(text, "after" | "begin" | "catch"),
        6 => matches!(text, "orelse"),
        7 => matches!(text, "andalso" | "receive"),
        _ => false,
    }
}

/// Custom reserved word predicate.
pub type ReservedPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// The "is this word reserved" predicate consulted for unquoted atoms.
#[derive(Clone)]
pub enum ReservedWords {
    /// Fixed keyword table plus the keywords of enabled features.
    Default { features: Arc<FxHashSet<String>> },
    /// Caller-supplied predicate replacing the default entirely.
    Custom(ReservedPredicate),
}

impl ReservedWords {
    pub fn with_features<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReservedWords::Default {
            features: Arc::new(features.into_iter().map(Into::into).collect()),
        }
    }

    pub fn custom(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        ReservedWords::Custom(Arc::new(predicate))
    }

    #[inline]
    pub fn is_reserved(&self, word: &str) -> bool {
        match self {
            ReservedWords::Default { features } => {
                is_fixed_keyword(word) || (!features.is_empty() && features.contains(word))
            }
            ReservedWords::Custom(predicate) => predicate(word),
        }
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        ReservedWords::Default {
            features: Arc::default(),
        }
    }
}

impl fmt::Debug for ReservedWords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservedWords::Default { features } => {
                let mut words: Vec<&str> = features.iter().map(String::as_str).collect();
                words.sort_unstable();
                f.debug_struct("Default").field("features", &words).finish()
            }
            ReservedWords::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
