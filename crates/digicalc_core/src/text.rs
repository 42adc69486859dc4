//! Text span types for source location tracking.
//!
//! Positions count characters (not bytes) from the start of a single
//! expression line, matching how the cursor walks its input.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A position in an expression, measured in characters from the start.
pub type TextPos = u32;

/// A span in expression text, defined by a start position and a length.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct TextSpan {
    /// The character offset where this span starts.
    pub start: TextPos,
    /// The length of this span in characters.
    pub length: TextPos,
}

impl TextSpan {
    /// Create a new text span.
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    /// Create a span from start and end positions.
    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    /// Create a span from `usize` character offsets, as a cursor counts them.
    ///
    /// Offsets beyond `TextPos::MAX` saturate, so a span on an enormous line
    /// points at its last representable position rather than wrapping.
    pub fn from_offsets(start: usize, end: usize) -> Self {
        let start = TextPos::try_from(start).unwrap_or(TextPos::MAX);
        let end = TextPos::try_from(end).unwrap_or(TextPos::MAX);
        Self::from_bounds(start, end.max(start))
    }

    /// Create an empty span at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self {
            start: pos,
            length: 0,
        }
    }

    /// The end position of this span (exclusive).
    #[inline]
    pub fn end(&self) -> TextPos {
        self.start.saturating_add(self.length)
    }

    /// Whether this span is empty (zero-length).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Return a new span covering both this span and the other.
    pub fn union(&self, other: &TextSpan) -> TextSpan {
        let start = self.start.min(other.start);
        let end = self.end().max(other.end());
        TextSpan::from_bounds(start, end)
    }

    /// Convert this character span into a byte range of `text`.
    ///
    /// Offsets past the end of `text` are clamped to its length, so the
    /// result can always be used to slice `text`.
    pub fn to_byte_range(&self, text: &str) -> Range<usize> {
        let start = byte_offset(text, self.start);
        let end = byte_offset(text, self.end());
        start..end
    }
}

/// Byte offset of the character at `pos`, or `text.len()` past the end.
fn byte_offset(text: &str, pos: TextPos) -> usize {
    text.char_indices()
        .nth(pos as usize)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}
