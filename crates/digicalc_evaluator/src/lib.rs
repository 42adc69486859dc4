//! digicalc_evaluator: Tree-walking evaluation of parsed expressions.
//!
//! Evaluation is pure: it borrows the tree, so the same tree can be
//! evaluated any number of times with the same result. Both operands of a
//! binary node are always evaluated, left first.

use digicalc_ast::{BinaryExpression, BinaryOperator, Node};
use digicalc_core::text::TextSpan;
use digicalc_diagnostics::EvalError;

enum Step<'a> {
    Visit(&'a Node),
    Apply(&'a BinaryExpression),
}

/// Evaluate a tree to its integer value.
///
/// Walks the tree in post-order with an explicit stack, so evaluation
/// depth is not limited by the thread's stack.
pub fn evaluate(node: &Node) -> Result<i64, EvalError> {
    let mut steps = vec![Step::Visit(node)];
    let mut values: Vec<i64> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(Node::Literal(n)) => values.push(n.value),
            Step::Visit(Node::Binary(n)) => {
                steps.push(Step::Apply(n));
                steps.push(Step::Visit(&n.right));
                steps.push(Step::Visit(&n.left));
            }
            Step::Apply(n) => {
                // Both operands were pushed by the two visits scheduled above.
                let right = values.pop().unwrap_or_default();
                let left = values.pop().unwrap_or_default();
                values.push(apply(n.operator, left, right, n.span)?);
            }
        }
    }
    Ok(values.pop().unwrap_or_default())
}

/// Apply `operator` to two values.
///
/// Division truncates toward zero. Division by zero and results outside
/// the `i64` range are errors rather than panics.
pub fn apply(operator: BinaryOperator, left: i64, right: i64, span: TextSpan) -> Result<i64, EvalError> {
    let result = match operator {
        BinaryOperator::Add => left.checked_add(right),
        BinaryOperator::Subtract => left.checked_sub(right),
        BinaryOperator::Multiply => left.checked_mul(right),
        BinaryOperator::Divide => {
            if right == 0 {
                return Err(EvalError::DivisionByZero { span });
            }
            left.checked_div(right)
        }
    };
    result.ok_or(EvalError::Overflow {
        operator: operator.as_char(),
        span,
    })
}

/// Something that evaluates to an integer.
pub trait Evaluate {
    fn evaluate(&self) -> Result<i64, EvalError>;
}

impl Evaluate for Node {
    fn evaluate(&self) -> Result<i64, EvalError> {
        evaluate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> TextSpan {
        TextSpan::new(0, 3)
    }

    #[test]
    fn test_apply_each_operator() {
        assert_eq!(apply(BinaryOperator::Add, 2, 3, span()), Ok(5));
        assert_eq!(apply(BinaryOperator::Subtract, 5, 3, span()), Ok(2));
        assert_eq!(apply(BinaryOperator::Multiply, 4, 6, span()), Ok(24));
        assert_eq!(apply(BinaryOperator::Divide, 10, 2, span()), Ok(5));
    }

    #[test]
    fn test_division_truncates_toward_zero() {
        assert_eq!(apply(BinaryOperator::Divide, 7, 2, span()), Ok(3));
        assert_eq!(apply(BinaryOperator::Divide, -7, 2, span()), Ok(-3));
        assert_eq!(apply(BinaryOperator::Divide, 7, -2, span()), Ok(-3));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            apply(BinaryOperator::Divide, 10, 0, span()),
            Err(EvalError::DivisionByZero { span: span() })
        );
    }

    #[test]
    fn test_evaluate_left_before_right() {
        let zero_division = |start| {
            Node::binary(
                Node::literal(1, TextSpan::new(start, 1)),
                BinaryOperator::Divide,
                Node::literal(0, TextSpan::new(start + 2, 1)),
            )
        };
        let node = Node::binary(zero_division(0), BinaryOperator::Add, zero_division(4));
        assert_eq!(
            evaluate(&node),
            Err(EvalError::DivisionByZero { span: TextSpan::new(0, 3) })
        );
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            apply(BinaryOperator::Multiply, i64::MAX, 2, span()),
            Err(EvalError::Overflow { operator: '*', span: span() })
        );
        assert_eq!(
            apply(BinaryOperator::Divide, i64::MIN, -1, span()),
            Err(EvalError::Overflow { operator: '/', span: span() })
        );
    }
}
