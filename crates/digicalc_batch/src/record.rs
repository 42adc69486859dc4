//! Structured, serializable form of an outcome.

use crate::Outcome;
use digicalc_core::text::TextSpan;
use serde::Serialize;

/// One outcome as a flat record, for machine-readable output.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeRecord<'a> {
    pub source: &'a str,
    pub line: usize,
    pub expression: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorRecord {
    pub kind: &'static str,
    pub code: String,
    pub message: String,
    pub span: TextSpan,
}

impl<'a> OutcomeRecord<'a> {
    /// Build a record; the parsed tree is included only when `with_tree` is set.
    pub fn new(source: &'a str, outcome: &'a Outcome, with_tree: bool) -> Self {
        let (value, tree, error) = match &outcome.result {
            Ok(evaluated) => (
                Some(evaluated.value),
                with_tree.then(|| evaluated.tree.to_string()),
                None,
            ),
            Err(e) => (
                None,
                None,
                Some(ErrorRecord {
                    kind: e.name(),
                    code: e.message().code_text(),
                    message: e.to_string(),
                    span: e.span(),
                }),
            ),
        };
        Self {
            source,
            line: outcome.line,
            expression: &outcome.expression,
            value,
            tree,
            error,
        }
    }

    /// Encode as a single line of JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
