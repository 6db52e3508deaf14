//! Per-scan configuration.

use crate::keywords::ReservedWords;

/// Immutable configuration of one scan.
///
/// A [`Continuation`](crate::Continuation) carries its own copy, so a scan
/// is always resumed with the options it was started with.
#[derive(Clone, Debug, Default)]
pub struct ScannerOptions {
    /// Predicate deciding which unquoted atoms are reserved words.
    pub reserved: ReservedWords,
    /// Record each token's original source text in its annotation.
    pub capture_text: bool,
    /// Recognize `%ssa%` check comments instead of skipping them.
    pub check_comments: bool,
}

impl ScannerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_text(mut self, capture_text: bool) -> Self {
        self.capture_text = capture_text;
        self
    }

    #[must_use]
    pub fn with_check_comments(mut self, check_comments: bool) -> Self {
        self.check_comments = check_comments;
        self
    }

    /// Reserve the keywords of enabled language features on top of the
    /// fixed table.
    #[must_use]
    pub fn with_feature_keywords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved = ReservedWords::with_features(words);
        self
    }

    #[must_use]
    pub fn with_reserved_predicate(
        mut self,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.reserved = ReservedWords::custom(predicate);
        self
    }

    #[inline]
    pub fn is_reserved(&self, word: &str) -> bool {
        self.reserved.is_reserved(word)
    }
}
