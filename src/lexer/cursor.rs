//! Character cursor over lexer input.

use crate::lexer::span::ByteOffset;

/// Byte-position cursor over input text.
///
/// The cursor always rests on a UTF-8 character boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    offset: ByteOffset,
}

impl Cursor {
    /// Creates a cursor at byte offset `0`.
    pub(crate) fn new() -> Self {
        Self {
            offset: ByteOffset::new(0),
        }
    }

    /// Returns the current byte offset.
    pub(crate) fn offset(&self) -> ByteOffset {
        self.offset
    }

    /// Returns `true` if the cursor is at or beyond input end.
    pub(crate) fn is_eof(&self, input: &str) -> bool {
        self.offset.as_usize() >= input.len()
    }

    /// Returns the current character at cursor position.
    pub(crate) fn peek_char(&self, input: &str) -> Option<char> {
        self.peek_nth_char(input, 0)
    }

    /// Returns the character `n` positions after the cursor.
    pub(crate) fn peek_nth_char(&self, input: &str, n: usize) -> Option<char> {
        input.get(self.offset.as_usize()..)?.chars().nth(n)
    }

    /// Returns `true` when the remaining input starts with `prefix`.
    pub(crate) fn starts_with(&self, input: &str, prefix: &str) -> bool {
        input
            .get(self.offset.as_usize()..)
            .is_some_and(|rest| rest.starts_with(prefix))
    }

    /// Consumes one character and returns it.
    pub(crate) fn advance_char(&mut self, input: &str) -> Option<char> {
        let ch = self.peek_char(input)?;
        self.advance_by(ch.len_utf8(), input);
        Some(ch)
    }

    /// Consumes characters while `predicate` holds.
    pub(crate) fn advance_while<P>(&mut self, input: &str, predicate: P)
    where
        P: Fn(char) -> bool,
    {
        while let Some(ch) = self.peek_char(input) {
            if !predicate(ch) {
                break;
            }
            self.advance_by(ch.len_utf8(), input);
        }
    }

    /// Advances the cursor by `count` bytes, clamped to input length.
    pub(crate) fn advance_by(&mut self, count: usize, input: &str) {
        let next = self
            .offset
            .as_usize()
            .saturating_add(count)
            .min(input.len());
        self.offset = ByteOffset::from_usize(next);
    }
}
