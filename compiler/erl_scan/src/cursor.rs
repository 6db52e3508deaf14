//! Character cursor over one scan step's input.
//!
//! Each step scans the logical concatenation of the previous step's
//! unconsumed tail and the newly delivered chunk. The cursor owns that
//! buffer and knows whether end-of-input has been signalled, which is what
//! lets every literal scanner tell "need more input" (`at_end()` without
//! `eof_signalled()`) from "input is over" (`is_eof()`).
//!
//! With no pending tail the chunk is borrowed, so scanning a whole text one
//! form at a time never copies the text.

use std::borrow::Cow;

/// UTF-8 lead byte shared by U+FFFE and U+FFFF.
const NONCHARACTER_LEAD: u8 = 0xEF;

/// Cursor over the pending tail plus the new chunk.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    buf: Cow<'a, str>,
    /// Current read position (byte index into `buf`).
    pos: usize,
    /// End-of-input sentinel was delivered: no more chunks will follow.
    eof: bool,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(mut pending: String, chunk: &'a str, eof: bool) -> Self {
        let buf = if pending.is_empty() {
            Cow::Borrowed(chunk)
        } else {
            pending.push_str(chunk);
            Cow::Owned(pending)
        };
        Self { buf, pos: 0, eof }
    }

    /// The character at the current position, `None` at the end of the buffer.
    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.buf[self.pos..].chars().next()
    }

    /// The character one position ahead of current.
    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.nth(1)
    }

    /// The character `n` positions ahead of current.
    #[inline]
    pub(crate) fn nth(&self, n: usize) -> Option<char> {
        self.buf[self.pos..].chars().nth(n)
    }

    /// Unconsumed text from the current position.
    #[inline]
    pub(crate) fn rest(&self) -> &str {
        &self.buf[self.pos..]
    }

    /// Consume one character.
    #[inline]
    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume `n` characters (fewer if the buffer ends first).
    pub(crate) fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
        }
    }

    /// The buffer is exhausted. More input may still arrive.
    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    #[inline]
    pub(crate) fn eof_signalled(&self) -> bool {
        self.eof
    }

    /// The buffer is exhausted and no more input will ever arrive.
    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.eof && self.at_end()
    }

    /// The buffer is exhausted but the caller may deliver more.
    #[inline]
    pub(crate) fn needs_more(&self) -> bool {
        !self.eof && self.at_end()
    }

    /// Current byte offset in the buffer.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Text from `start` to the current position.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &str {
        &self.buf[start..self.pos]
    }

    /// Returns `true` if the unconsumed text is a proper prefix of `word`,
    /// meaning the next chunk could still complete it.
    pub(crate) fn rest_is_proper_prefix_of(&self, word: &str) -> bool {
        let rest = self.rest();
        rest.len() < word.len() && word.starts_with(rest)
    }

    /// Advance over comment text: up to the next `\n` or the next invalid
    /// character (neither consumed), or the end of the buffer.
    ///
    /// Returns the number of characters skipped.
    pub(crate) fn eat_comment_text(&mut self) -> usize {
        let bytes = self.buf.as_bytes();
        let mut end = bytes.len();
        let mut from = self.pos;
        while let Some(found) = memchr::memchr2(b'\n', NONCHARACTER_LEAD, &bytes[from..]) {
            let at = from + found;
            if bytes[at] == b'\n' || matches!(bytes.get(at + 1..at + 3), Some([0xBF, 0xBE | 0xBF])) {
                end = at;
                break;
            }
            from = at + 1;
        }
        let skipped = self.buf[self.pos..end].chars().count();
        self.pos = end;
        skipped
    }

    /// Consume the cursor, returning the unconsumed text.
    pub(crate) fn into_rest(self) -> String {
        match self.buf {
            Cow::Owned(buf) if self.pos == 0 => buf,
            buf => buf[self.pos..].to_owned(),
        }
    }
}
