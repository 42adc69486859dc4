//! digicalc_parser: Recursive descent parser for single-digit arithmetic.
//!
//! Reads characters from a `Cursor` and builds a `Node` tree, or stops at
//! the first problem with a `ParseError`.

mod parser;
mod precedence;

pub use parser::{parse_expression, Parser, MAX_NESTING_DEPTH};
pub use precedence::{binary_operator_precedence, OperatorPrecedence};
