//! digicalc_diagnostics: Error types and diagnostic reporting.
//!
//! Every failure an expression can hit is described twice: as a typed error
//! value (`ParseError`, `EvalError`, `CalcError`) that callers match on, and as
//! an entry of the message table below, which gives it a stable code and a
//! category for reporting.

mod error;
mod report;

pub use error::{CalcError, EvalError, ParseError, ParseErrorKind};
pub use report::to_report;

use digicalc_core::text::TextSpan;
use std::fmt;

/// Diagnostic category: which phase rejected the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Syntax,
    Runtime,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Syntax => write!(f, "syntax error"),
            DiagnosticCategory::Runtime => write!(f, "runtime error"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001, 2001).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// The printable code, e.g. `DC1001`.
    pub fn code_text(&self) -> String {
        format!("DC{}", self.code)
    }
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// The input the expression came from, if any.
    pub file: Option<String>,
    /// The 1-based line of the expression within `file`.
    pub line: Option<usize>,
    /// The span inside the expression where the failure was detected.
    pub span: Option<TextSpan>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            line: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// Attach the span inside the expression.
    pub fn with_span(mut self, span: TextSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach the input name and line number.
    pub fn with_location(mut self, file: impl Into<String>, line: usize) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    /// Whether this diagnostic came from the parser.
    pub fn is_syntax_error(&self) -> bool {
        self.category == DiagnosticCategory::Syntax
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
                if let Some(span) = self.span {
                    write!(f, ":{}", span.start + 1)?;
                }
            }
            write!(f, ": ")?;
        }
        write!(
            f,
            "{} DC{}: {}",
            self.category, self.code, self.message_text
        )
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// A collection of diagnostics accumulated over a batch of expressions.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn syntax_error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.is_syntax_error())
            .count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Syntax, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Syntax, message: $msg }
        };
        ($code:expr, Runtime, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Runtime, message: $msg }
        };
    }

    // ========================================================================
    // Parser errors (1000-1099)
    // ========================================================================
    pub const UNEXPECTED_CHARACTER: DiagnosticMessage = diag!(1001, Syntax, "unexpected character in expression");
    pub const FRACTIONAL_NUMBER: DiagnosticMessage = diag!(1002, Syntax, "fractional numbers are not allowed");
    pub const MULTI_DIGIT_NUMBER: DiagnosticMessage = diag!(1003, Syntax, "only single-digit integers are allowed");
    pub const UNMATCHED_PARENTHESIS: DiagnosticMessage = diag!(1004, Syntax, "invalid character, expected ')' after '('");
    pub const UNMATCHED_CLOSING_PARENTHESIS: DiagnosticMessage = diag!(1005, Syntax, "unexpected ')' without opening '('");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = diag!(1006, Syntax, "parentheses are nested too deeply");

    // ========================================================================
    // Evaluation errors (2000-2099)
    // ========================================================================
    pub const DIVISION_BY_ZERO: DiagnosticMessage = diag!(2001, Runtime, "integer divide by zero");
    pub const ARITHMETIC_OVERFLOW_IN_0: DiagnosticMessage = diag!(2002, Runtime, "arithmetic overflow in '{0}'");
}
