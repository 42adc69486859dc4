//! Character constants recognized by the grammar.

pub const SPACE: char = ' ';
pub const OPEN_PAREN: char = '(';
pub const CLOSE_PAREN: char = ')';
pub const DOT: char = '.';

/// Check if a character is a decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Numeric value of a decimal digit.
#[inline]
pub fn digit_value(ch: char) -> Option<i64> {
    ch.to_digit(10).map(i64::from)
}
