//! The expression parser.
//!
//! Precedence climbing over three levels, lowest first:
//!
//! ```text
//! expr   := term (('+'|'-') term)*
//! term   := factor (('*'|'/') factor)*
//! factor := DIGIT | '(' expr ')'
//! ```
//!
//! Both binary levels fold left-associatively. Every production either
//! consumes a character or fails, so parsing always terminates.

use digicalc_ast::{BinaryOperator, Node};
use digicalc_core::text::TextSpan;
use digicalc_diagnostics::{ParseError, ParseErrorKind};
use digicalc_scanner::char_codes::{digit_value, is_digit, CLOSE_PAREN, DOT, OPEN_PAREN};
use digicalc_scanner::Cursor;

use crate::precedence::{binary_operator_precedence, OperatorPrecedence};

/// Maximum parenthesis nesting, to prevent stack overflow on deeply nested input.
pub const MAX_NESTING_DEPTH: u32 = 200;

/// Parse `text` as one complete expression.
///
/// Fails if anything is left over after the top-level production, with
/// `UnmatchedClosingParenthesis` for a stray `)` and `UnexpectedCharacter`
/// for anything else.
pub fn parse_expression(text: &str) -> Result<Node, ParseError> {
    Parser::new(text).parse_complete()
}

/// Parses a single expression. Create one per expression.
pub struct Parser {
    cursor: Cursor,
    /// Current parenthesis nesting.
    nesting_depth: u32,
}

impl Parser {
    pub fn new(text: &str) -> Self {
        Self {
            cursor: Cursor::new(text),
            nesting_depth: 0,
        }
    }

    /// The cursor, positioned after whatever has been parsed so far.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Parse the top-level production. Does not require the input to be
    /// fully consumed; see [`Parser::parse_complete`].
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        self.parse_add_sub()
    }

    /// Parse the top-level production and require end of input.
    pub fn parse_complete(&mut self) -> Result<Node, ParseError> {
        let node = self.parse()?;
        match self.cursor.current_char() {
            None => Ok(node),
            Some(CLOSE_PAREN) => Err(self.error(ParseErrorKind::UnmatchedClosingParenthesis)),
            Some(_) => Err(self.error(ParseErrorKind::UnexpectedCharacter)),
        }
    }

    // ========================================================================
    // Binary levels
    // ========================================================================

    /// `term (('+'|'-') term)*`
    pub fn parse_add_sub(&mut self) -> Result<Node, ParseError> {
        self.parse_binary_level(OperatorPrecedence::Additive, Self::parse_mul_div)
    }

    /// `factor (('*'|'/') factor)*`
    pub fn parse_mul_div(&mut self) -> Result<Node, ParseError> {
        self.parse_binary_level(OperatorPrecedence::Multiplicative, Self::parse_primary)
    }

    fn parse_binary_level(
        &mut self,
        precedence: OperatorPrecedence,
        parse_operand: fn(&mut Self) -> Result<Node, ParseError>,
    ) -> Result<Node, ParseError> {
        let mut left = parse_operand(self)?;
        while let Some(operator) = self.current_operator(precedence) {
            self.cursor.advance();
            let right = parse_operand(self)?;
            left = Node::binary(left, operator, right);
        }
        Ok(left)
    }

    /// The operator at the cursor, if it belongs to `precedence`.
    fn current_operator(&self, precedence: OperatorPrecedence) -> Option<BinaryOperator> {
        self.cursor
            .current_char()
            .and_then(BinaryOperator::from_char)
            .filter(|op| binary_operator_precedence(*op) == precedence)
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    /// `DIGIT | '(' expr ')'`
    pub fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let current = self.cursor.current_char();
        if current == Some(OPEN_PAREN) {
            return self.parse_parenthesized();
        }
        match current.and_then(digit_value) {
            Some(value) => self.parse_digit(value),
            None => Err(self.error(ParseErrorKind::UnexpectedCharacter)),
        }
    }

    fn parse_parenthesized(&mut self) -> Result<Node, ParseError> {
        if self.nesting_depth >= MAX_NESTING_DEPTH {
            return Err(self.error(ParseErrorKind::NestingTooDeep));
        }
        let open = self.cursor.pos();
        self.cursor.advance();

        self.nesting_depth += 1;
        let inner = self.parse_add_sub();
        self.nesting_depth -= 1;
        let inner = inner?;

        if self.cursor.current_char() != Some(CLOSE_PAREN) {
            return Err(self.error(ParseErrorKind::UnmatchedParenthesis));
        }
        let close = self.cursor.pos();
        self.cursor.advance();
        Ok(inner.with_span(TextSpan::from_offsets(open, close + 1)))
    }

    fn parse_digit(&mut self, value: i64) -> Result<Node, ParseError> {
        // One character of lookahead decides whether the number is a lone digit.
        match self.cursor.peek_char() {
            Some(next) if is_digit(next) => {
                return Err(self.error_spanning_next(ParseErrorKind::MultiDigitNumber));
            }
            Some(DOT) => return Err(self.error_spanning_next(ParseErrorKind::FractionalNumber)),
            _ => {}
        }
        let span = self.cursor.current_span();
        self.cursor.advance();
        Ok(Node::literal(value, span))
    }

    // ========================================================================
    // Errors
    // ========================================================================

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.cursor.current_span())
    }

    /// An error covering the current character and the one after it.
    fn error_spanning_next(&self, kind: ParseErrorKind) -> ParseError {
        let pos = self.cursor.pos();
        ParseError::new(kind, TextSpan::from_offsets(pos, pos + 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_span() {
        let node = parse_expression("7").unwrap();
        assert_eq!(node, Node::literal(7, TextSpan::new(0, 1)));
    }

    #[test]
    fn test_parenthesized_span_includes_parens() {
        let node = parse_expression("(1+2)*3").unwrap();
        match &node {
            Node::Binary(b) => assert_eq!(b.left.span(), TextSpan::from_bounds(0, 5)),
            other => panic!("expected binary node, got {:?}", other),
        }
    }

    #[test]
    fn test_nesting_depth_restored_after_group() {
        let mut parser = Parser::new("((1))+((2))");
        parser.parse_complete().unwrap();
        assert_eq!(parser.nesting_depth, 0);
    }

    #[test]
    fn test_error_span_at_end_of_input() {
        let err = parse_expression("1+").unwrap_err();
        assert_eq!(err.span, TextSpan::empty(2));
    }

    #[test]
    fn test_multi_digit_span_covers_both_digits() {
        let err = parse_expression("3*12").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MultiDigitNumber);
        assert_eq!(err.span, TextSpan::new(2, 2));
    }
}
