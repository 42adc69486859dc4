//! digicalc_ast: Abstract syntax tree for single-digit arithmetic.
//!
//! A tree is either a literal or a binary operation that owns both of its
//! operands. Trees are immutable once the parser hands them out.

pub mod node;
pub mod operator;

// Re-export key types
pub use node::*;
pub use operator::BinaryOperator;
