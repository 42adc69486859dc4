//! Rich, source-labeled reports for failed expressions.

use crate::{CalcError, EvalError, ParseErrorKind};
use miette::{LabeledSpan, MietteDiagnostic, NamedSource, Report, Severity};

/// Build a `miette` report for `error`, labeled against the expression text.
///
/// Spans are stored in characters; they are converted to byte offsets of
/// `expression` here so multi-byte input is labeled correctly.
pub fn to_report(error: &CalcError, source_name: &str, expression: &str) -> Report {
    let range = error.span().to_byte_range(expression);
    let diagnostic = MietteDiagnostic::new(error.to_string())
        .with_code(error.message().code_text())
        .with_severity(Severity::Error)
        .with_label(LabeledSpan::at(range, label_text(error)));
    let diagnostic = match help_text(error) {
        Some(help) => diagnostic.with_help(help),
        None => diagnostic,
    };
    Report::new(diagnostic).with_source_code(NamedSource::new(source_name, expression.to_string()))
}

fn label_text(error: &CalcError) -> &'static str {
    match error {
        CalcError::Parse(e) => match e.kind {
            ParseErrorKind::UnexpectedCharacter => "expected a digit or '('",
            ParseErrorKind::FractionalNumber => "fractional part starts here",
            ParseErrorKind::MultiDigitNumber => "number has more than one digit",
            ParseErrorKind::UnmatchedParenthesis => "expected ')'",
            ParseErrorKind::UnmatchedClosingParenthesis => "no matching '('",
            ParseErrorKind::NestingTooDeep => "nesting limit reached here",
        },
        CalcError::Eval(EvalError::DivisionByZero { .. }) => "right operand is zero",
        CalcError::Eval(EvalError::Overflow { .. }) => "result does not fit in 64 bits",
    }
}

fn help_text(error: &CalcError) -> Option<&'static str> {
    match error.parse_kind()? {
        ParseErrorKind::UnexpectedCharacter => {
            Some("operands are single digits; operators are + - * /; one space is allowed between tokens")
        }
        ParseErrorKind::MultiDigitNumber | ParseErrorKind::FractionalNumber => {
            Some("only the digits 0 through 9 can be used as operands")
        }
        _ => None,
    }
}
