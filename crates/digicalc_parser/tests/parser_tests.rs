//! Parser integration tests.
//!
//! Verifies tree shape, precedence, grouping and every parse error kind,
//! both for the individual grammar levels and for complete expressions.

use digicalc_ast::{BinaryOperator, Node};
use digicalc_diagnostics::ParseErrorKind;
use digicalc_parser::{parse_expression, Parser, MAX_NESTING_DEPTH};

/// Helper: parse a complete expression and print its tree.
fn tree(source: &str) -> String {
    match parse_expression(source) {
        Ok(node) => node.to_string(),
        Err(e) => panic!("unexpected error for {:?}: {}", source, e),
    }
}

/// Helper: parse a complete expression and return the error kind.
fn error_kind(source: &str) -> ParseErrorKind {
    match parse_expression(source) {
        Ok(node) => panic!("expected error for {:?}, parsed {}", source, node),
        Err(e) => e.kind,
    }
}

// ============================================================================
// Tree shape
// ============================================================================

#[test]
fn test_single_digit() {
    assert_eq!(tree("5"), "5");
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(tree("2+3*4"), "(2 + (3 * 4))");
    assert_eq!(tree("2*3+1"), "((2 * 3) + 1)");
}

#[test]
fn test_left_associative_addition() {
    assert_eq!(tree("1+2-3"), "((1 + 2) - 3)");
}

#[test]
fn test_left_associative_division() {
    assert_eq!(tree("2/3*4"), "((2 / 3) * 4)");
    assert_eq!(tree("8/4/2"), "((8 / 4) / 2)");
}

#[test]
fn test_grouping() {
    assert_eq!(tree("(2+3)*4"), "((2 + 3) * 4)");
    assert_eq!(tree("(2+3)*(1+1)"), "((2 + 3) * (1 + 1))");
}

#[test]
fn test_nested_grouping_with_spaces() {
    assert_eq!(tree("(4 + 5 * (7 - 3)) - 2"), "((4 + (5 * (7 - 3))) - 2)");
}

#[test]
fn test_redundant_parentheses() {
    assert_eq!(tree("((1))"), "1");
}

#[test]
fn test_single_spaces_do_not_change_tree() {
    assert_eq!(tree("1 + 2"), tree("1+2"));
    assert_eq!(tree("( 1 * 2 )"), tree("(1*2)"));
}

#[test]
fn test_trailing_space_is_consumed() {
    assert_eq!(tree("1+2 "), "(1 + 2)");
}

#[test]
fn test_operator_of_root() {
    match &parse_expression("9-8*7").unwrap() {
        Node::Binary(b) => {
            assert_eq!(b.operator, BinaryOperator::Subtract);
            assert_eq!(b.right.to_string(), "(8 * 7)");
        }
        other => panic!("expected binary node, got {:?}", other),
    }
}

// ============================================================================
// Errors from complete expressions
// ============================================================================

#[test]
fn test_missing_right_operand() {
    assert_eq!(error_kind("1+"), ParseErrorKind::UnexpectedCharacter);
}

#[test]
fn test_double_operator() {
    assert_eq!(error_kind("1++2"), ParseErrorKind::UnexpectedCharacter);
}

#[test]
fn test_fractional_number() {
    assert_eq!(error_kind("1+2.0"), ParseErrorKind::FractionalNumber);
    assert_eq!(error_kind("1.2+2"), ParseErrorKind::FractionalNumber);
}

#[test]
fn test_multi_digit_number() {
    assert_eq!(error_kind("12+3"), ParseErrorKind::MultiDigitNumber);
    assert_eq!(error_kind("3+45"), ParseErrorKind::MultiDigitNumber);
}

#[test]
fn test_unmatched_parenthesis() {
    assert_eq!(error_kind("(1 + 5 * 3"), ParseErrorKind::UnmatchedParenthesis);
    assert_eq!(error_kind("((1+2)"), ParseErrorKind::UnmatchedParenthesis);
}

#[test]
fn test_unmatched_closing_parenthesis() {
    assert_eq!(error_kind("1+2)"), ParseErrorKind::UnmatchedClosingParenthesis);
    assert_eq!(error_kind("(1))"), ParseErrorKind::UnmatchedClosingParenthesis);
}

#[test]
fn test_leftover_letter() {
    assert_eq!(error_kind("1a + 4"), ParseErrorKind::UnexpectedCharacter);
}

#[test]
fn test_empty_input() {
    assert_eq!(error_kind(""), ParseErrorKind::UnexpectedCharacter);
}

#[test]
fn test_leading_close_paren() {
    assert_eq!(error_kind(")"), ParseErrorKind::UnexpectedCharacter);
}

#[test]
fn test_leading_space_is_rejected() {
    assert_eq!(error_kind(" 1+2"), ParseErrorKind::UnexpectedCharacter);
}

#[test]
fn test_two_spaces_leave_one_unconsumed() {
    assert_eq!(error_kind("1 +  2"), ParseErrorKind::UnexpectedCharacter);
}

#[test]
fn test_unknown_operator() {
    assert_eq!(error_kind("4%2"), ParseErrorKind::UnexpectedCharacter);
}

#[test]
fn test_unary_minus_is_rejected() {
    assert_eq!(error_kind("-1"), ParseErrorKind::UnexpectedCharacter);
}

#[test]
fn test_error_span_points_at_offender() {
    let err = parse_expression("1a + 4").unwrap_err();
    assert_eq!(err.span.start, 1);
    assert_eq!(err.span.length, 1);

    let err = parse_expression("1+2)").unwrap_err();
    assert_eq!(err.span.start, 3);
}

// ============================================================================
// Nesting limit
// ============================================================================

fn nested(depth: usize) -> String {
    format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_nesting_at_limit_is_accepted() {
    assert_eq!(tree(&nested(MAX_NESTING_DEPTH as usize)), "1");
}

#[test]
fn test_nesting_beyond_limit_is_rejected() {
    assert_eq!(
        error_kind(&nested(MAX_NESTING_DEPTH as usize + 1)),
        ParseErrorKind::NestingTooDeep
    );
}

// ============================================================================
// Individual grammar levels
// ============================================================================

#[test]
fn test_parse_primary_levels() {
    let cases = [("1", "1"), ("(1)", "1"), ("(1+2)", "(1 + 2)"), ("(1+(2*3))", "(1 + (2 * 3))")];
    for (source, expected) in cases {
        let node = Parser::new(source).parse_primary().unwrap();
        assert_eq!(node.to_string(), expected, "source: {}", source);
    }
}

#[test]
fn test_parse_primary_stops_after_first_operand() {
    let mut parser = Parser::new("1+2");
    assert_eq!(parser.parse_primary().unwrap().to_string(), "1");
    assert_eq!(parser.cursor().current_char(), Some('+'));
}

#[test]
fn test_parse_primary_errors() {
    let cases = [
        ("1.2+2", ParseErrorKind::FractionalNumber),
        ("12+3", ParseErrorKind::MultiDigitNumber),
        ("(1 + 5 * 3", ParseErrorKind::UnmatchedParenthesis),
        ("+", ParseErrorKind::UnexpectedCharacter),
    ];
    for (source, expected) in cases {
        let err = Parser::new(source).parse_primary().unwrap_err();
        assert_eq!(err.kind, expected, "source: {}", source);
    }
}

#[test]
fn test_parse_mul_div_stops_at_additive_operator() {
    let mut parser = Parser::new("2*3+1");
    assert_eq!(parser.parse_mul_div().unwrap().to_string(), "(2 * 3)");
    assert_eq!(parser.cursor().current_char(), Some('+'));
}

#[test]
fn test_parse_mul_div_errors() {
    let cases = [
        ("2*3.0", ParseErrorKind::FractionalNumber),
        ("12*3", ParseErrorKind::MultiDigitNumber),
        ("(1 * 5 / 3", ParseErrorKind::UnmatchedParenthesis),
    ];
    for (source, expected) in cases {
        let err = Parser::new(source).parse_mul_div().unwrap_err();
        assert_eq!(err.kind, expected, "source: {}", source);
    }
}

#[test]
fn test_parse_does_not_require_end_of_input() {
    let mut parser = Parser::new("1+2)");
    assert_eq!(parser.parse().unwrap().to_string(), "(1 + 2)");
    assert_eq!(parser.cursor().current_char(), Some(')'));
}

#[test]
fn test_parse_add_sub_matches_parse() {
    for source in ["1+2", "1-2", "2*3+1", "(2+3)*(1+1)"] {
        let a = Parser::new(source).parse_add_sub().unwrap();
        let b = Parser::new(source).parse().unwrap();
        assert_eq!(a, b, "source: {}", source);
    }
}
