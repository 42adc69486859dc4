//! AST node definitions.
//!
//! `Node` is a closed sum type over the two node shapes. Binary nodes own
//! their operands through `Box`, so a tree has no sharing and no cycles.

use crate::operator::BinaryOperator;
use digicalc_core::text::TextSpan;
use std::fmt;

/// A parsed expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal(Literal),
    Binary(BinaryExpression),
}

/// An integer constant. The grammar only produces 0 through 9.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub value: i64,
    pub span: TextSpan,
}

/// `left operator right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpression {
    pub left: Box<Node>,
    pub operator: BinaryOperator,
    pub right: Box<Node>,
    pub span: TextSpan,
}

impl Node {
    /// Create a literal node.
    pub fn literal(value: i64, span: TextSpan) -> Self {
        Node::Literal(Literal { value, span })
    }

    /// Create a binary node spanning from `left` to `right`.
    pub fn binary(left: Node, operator: BinaryOperator, right: Node) -> Self {
        let span = left.span().union(&right.span());
        Node::Binary(BinaryExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        })
    }

    /// The source span this node covers.
    pub fn span(&self) -> TextSpan {
        match self {
            Node::Literal(n) => n.span,
            Node::Binary(n) => n.span,
        }
    }

    /// Return this node with its span replaced. Used to widen a
    /// parenthesized expression over its parentheses.
    pub fn with_span(mut self, span: TextSpan) -> Self {
        match &mut self {
            Node::Literal(n) => n.span = span,
            Node::Binary(n) => n.span = span,
        }
        self
    }
}

/// Prints the tree fully parenthesized, e.g. `((2 + 3) * 4)`, which makes
/// the parsed precedence and grouping visible.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Explicit stack: left-deep chains are as deep as they are long.
        let mut pending = vec![Print::Node(self)];
        while let Some(item) = pending.pop() {
            match item {
                Print::Node(Node::Literal(n)) => write!(f, "{}", n.value)?,
                Print::Node(Node::Binary(n)) => {
                    f.write_str("(")?;
                    pending.push(Print::Close);
                    pending.push(Print::Node(&n.right));
                    pending.push(Print::Operator(n.operator));
                    pending.push(Print::Node(&n.left));
                }
                Print::Operator(operator) => write!(f, " {} ", operator)?,
                Print::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}

enum Print<'a> {
    Node(&'a Node),
    Operator(BinaryOperator),
    Close,
}

/// Tears the tree down with a work list instead of recursing once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        if let Node::Binary(n) = self {
            n.detach_children(&mut detached);
        }
        while let Some(mut node) = detached.pop() {
            if let Node::Binary(n) = &mut node {
                n.detach_children(&mut detached);
            }
            // `node` now has only literal children and drops without recursing.
        }
    }
}

impl BinaryExpression {
    /// Move binary children into `out`, leaving empty literals behind.
    fn detach_children(&mut self, out: &mut Vec<Node>) {
        for child in [&mut self.left, &mut self.right] {
            if let Node::Binary(_) = **child {
                let span = child.span();
                out.push(std::mem::replace(&mut **child, Node::literal(0, span)));
            }
        }
    }
}
