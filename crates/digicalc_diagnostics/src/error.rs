//! Typed errors for parsing and evaluating a single expression.

use crate::{messages, Diagnostic, DiagnosticCategory, DiagnosticMessage};
use digicalc_core::text::TextSpan;
use std::fmt;
use thiserror::Error;

/// Why the parser rejected an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A primary expression was expected but the current character is not a
    /// digit or `(`; also any non-`)` character left over after a full parse.
    UnexpectedCharacter,
    /// A digit is immediately followed by `.`.
    FractionalNumber,
    /// A digit is immediately followed by another digit.
    MultiDigitNumber,
    /// A `(` was not closed by `)`.
    UnmatchedParenthesis,
    /// A `)` was left over after a complete top-level parse.
    UnmatchedClosingParenthesis,
    /// Parentheses are nested beyond the parser's depth limit.
    NestingTooDeep,
}

impl ParseErrorKind {
    /// The message table entry for this kind.
    pub fn message(self) -> &'static DiagnosticMessage {
        match self {
            ParseErrorKind::UnexpectedCharacter => &messages::UNEXPECTED_CHARACTER,
            ParseErrorKind::FractionalNumber => &messages::FRACTIONAL_NUMBER,
            ParseErrorKind::MultiDigitNumber => &messages::MULTI_DIGIT_NUMBER,
            ParseErrorKind::UnmatchedParenthesis => &messages::UNMATCHED_PARENTHESIS,
            ParseErrorKind::UnmatchedClosingParenthesis => {
                &messages::UNMATCHED_CLOSING_PARENTHESIS
            }
            ParseErrorKind::NestingTooDeep => &messages::NESTING_TOO_DEEP,
        }
    }

    /// A stable identifier, used in structured output.
    pub fn name(self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedCharacter => "UnexpectedCharacter",
            ParseErrorKind::FractionalNumber => "FractionalNumber",
            ParseErrorKind::MultiDigitNumber => "MultiDigitNumber",
            ParseErrorKind::UnmatchedParenthesis => "UnmatchedParenthesis",
            ParseErrorKind::UnmatchedClosingParenthesis => "UnmatchedClosingParenthesis",
            ParseErrorKind::NestingTooDeep => "NestingTooDeep",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().message)
    }
}

/// A failed parse: what went wrong and where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: TextSpan,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: TextSpan) -> Self {
        Self { kind, span }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.kind.message(), &[]).with_span(self.span)
    }
}

/// A failure while evaluating a well-formed tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("integer divide by zero")]
    DivisionByZero { span: TextSpan },
    #[error("arithmetic overflow in '{operator}'")]
    Overflow { operator: char, span: TextSpan },
}

impl EvalError {
    pub fn span(&self) -> TextSpan {
        match self {
            EvalError::DivisionByZero { span } | EvalError::Overflow { span, .. } => *span,
        }
    }

    pub fn message(&self) -> &'static DiagnosticMessage {
        match self {
            EvalError::DivisionByZero { .. } => &messages::DIVISION_BY_ZERO,
            EvalError::Overflow { .. } => &messages::ARITHMETIC_OVERFLOW_IN_0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EvalError::DivisionByZero { .. } => "DivisionByZero",
            EvalError::Overflow { .. } => "Overflow",
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = match self {
            EvalError::DivisionByZero { .. } => Diagnostic::new(self.message(), &[]),
            EvalError::Overflow { operator, .. } => {
                Diagnostic::new(self.message(), &[&operator.to_string()])
            }
        };
        diagnostic.with_span(self.span())
    }
}

/// Any failure of the parse-then-evaluate pipeline for one expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl CalcError {
    pub fn span(&self) -> TextSpan {
        match self {
            CalcError::Parse(e) => e.span,
            CalcError::Eval(e) => e.span(),
        }
    }

    pub fn message(&self) -> &'static DiagnosticMessage {
        match self {
            CalcError::Parse(e) => e.kind.message(),
            CalcError::Eval(e) => e.message(),
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        self.message().category
    }

    pub fn name(&self) -> &'static str {
        match self {
            CalcError::Parse(e) => e.kind.name(),
            CalcError::Eval(e) => e.name(),
        }
    }

    /// The parse error kind, if parsing failed.
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            CalcError::Parse(e) => Some(e.kind),
            CalcError::Eval(_) => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CalcError::Parse(e) => e.to_diagnostic(),
            CalcError::Eval(e) => e.to_diagnostic(),
        }
    }
}
