//! Per-expression outcomes and the batch report.

use digicalc_ast::Node;
use digicalc_diagnostics::{CalcError, DiagnosticCategory, DiagnosticCollection};
use std::fmt;

/// A successfully evaluated expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluated {
    pub value: i64,
    pub tree: Node,
}

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// 1-based line number within the input.
    pub line: usize,
    pub expression: String,
    pub result: Result<Evaluated, CalcError>,
}

impl Outcome {
    pub fn value(&self) -> Option<i64> {
        self.result.as_ref().ok().map(|e| e.value)
    }

    pub fn error(&self) -> Option<&CalcError> {
        self.result.as_ref().err()
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// `<expression> = <value>`, or a one-line description of the failure.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(evaluated) => write!(f, "{} = {}", self.expression, evaluated.value),
            Err(e) => {
                let phase = match e.category() {
                    DiagnosticCategory::Syntax => "parsing",
                    DiagnosticCategory::Runtime => "evaluating",
                };
                write!(f, "Error {} expression {}: {}", phase, self.expression, e)
            }
        }
    }
}

/// All outcomes of one batch, in input order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    source_name: String,
    outcomes: Vec<Outcome>,
}

impl BatchReport {
    pub(crate) fn new(source_name: String, outcomes: Vec<Outcome>) -> Self {
        Self {
            source_name,
            outcomes,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| !o.is_ok())
    }

    /// One diagnostic per failed line, located by source name and line.
    pub fn diagnostics(&self) -> DiagnosticCollection {
        let mut collection = DiagnosticCollection::new();
        for outcome in &self.outcomes {
            if let Some(e) = outcome.error() {
                collection.add(
                    e.to_diagnostic()
                        .with_location(self.source_name.clone(), outcome.line),
                );
            }
        }
        collection
    }
}
