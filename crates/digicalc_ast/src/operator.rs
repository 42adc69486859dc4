//! Binary operators.

use std::fmt;

/// The four arithmetic operators. The set is closed: the parser can only
/// produce these, so evaluation never meets an unknown operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// Map an operator character to its operator.
    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(BinaryOperator::Add),
            '-' => Some(BinaryOperator::Subtract),
            '*' => Some(BinaryOperator::Multiply),
            '/' => Some(BinaryOperator::Divide),
            _ => None,
        }
    }

    /// The source character for this operator.
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
        }
    }

    /// Whether this operator is `*` or `/`.
    #[inline]
    pub fn is_multiplicative(self) -> bool {
        matches!(self, BinaryOperator::Multiply | BinaryOperator::Divide)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
