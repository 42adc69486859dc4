//! Operator precedence for binary operators.

use digicalc_ast::BinaryOperator;

/// Operator precedence levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Additive = 0,
    Multiplicative = 1,
}

/// Get the precedence level a binary operator is folded at.
pub fn binary_operator_precedence(operator: BinaryOperator) -> OperatorPrecedence {
    if operator.is_multiplicative() {
        OperatorPrecedence::Multiplicative
    } else {
        OperatorPrecedence::Additive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplicative_binds_tighter() {
        assert!(OperatorPrecedence::Multiplicative > OperatorPrecedence::Additive);
    }

    #[test]
    fn test_levels() {
        assert_eq!(binary_operator_precedence(BinaryOperator::Add), OperatorPrecedence::Additive);
        assert_eq!(binary_operator_precedence(BinaryOperator::Subtract), OperatorPrecedence::Additive);
        assert_eq!(binary_operator_precedence(BinaryOperator::Multiply), OperatorPrecedence::Multiplicative);
        assert_eq!(binary_operator_precedence(BinaryOperator::Divide), OperatorPrecedence::Multiplicative);
    }
}
