//! The expression cursor.

use crate::char_codes::SPACE;
use digicalc_core::text::TextSpan;

/// A read position over the characters of one expression.
///
/// The position never exceeds the length of the text. Reading at the end
/// yields `None` rather than failing.
#[derive(Debug, Clone)]
pub struct Cursor {
    /// The expression being read.
    text: Vec<char>,
    /// Current position in `text`.
    pos: usize,
}

impl Cursor {
    /// Create a cursor at the start of `text`.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
        }
    }

    /// The character at the current position.
    #[inline]
    pub fn current_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    /// The character after the current one, without moving.
    #[inline]
    pub fn peek_char(&self) -> Option<char> {
        self.text.get(self.pos + 1).copied()
    }

    /// Move forward one character, then step over a single space if one
    /// follows. Only one space is skipped: a run of two leaves the second
    /// space as the current character.
    pub fn advance(&mut self) {
        self.bump();
        if self.current_char() == Some(SPACE) {
            self.bump();
        }
    }

    #[inline]
    fn bump(&mut self) {
        if self.pos < self.text.len() {
            self.pos += 1;
        }
    }

    /// Current position, in characters.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Whether every character has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// A one-character span at the current position, or an empty span at
    /// the end of the text.
    pub fn current_span(&self) -> TextSpan {
        let len = if self.is_at_end() { 0 } else { 1 };
        TextSpan::from_offsets(self.pos, self.pos + len)
    }
}
