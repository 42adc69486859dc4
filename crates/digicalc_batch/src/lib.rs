//! digicalc_batch: Evaluation of many independent expressions.
//!
//! A `Batch` holds the lines read from one input. Evaluating it parses and
//! evaluates every line as its own task; the tasks share nothing, and one
//! failing line never affects another. Outcomes come back in input order.

mod outcome;
mod record;

pub use outcome::{BatchReport, Evaluated, Outcome};
pub use record::{ErrorRecord, OutcomeRecord};

use digicalc_diagnostics::CalcError;
use digicalc_evaluator::Evaluate;
use digicalc_parser::parse_expression;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// One input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number within the input.
    pub line: usize,
    /// The expression text, without its line terminator.
    pub text: String,
}

/// The expressions read from one input source.
#[derive(Debug, Clone)]
pub struct Batch {
    source_name: String,
    lines: Vec<SourceLine>,
}

impl Batch {
    /// Create an empty batch for the named source.
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            lines: Vec::new(),
        }
    }

    /// Read one expression per line from `reader`.
    ///
    /// `\n` and `\r\n` terminators are stripped. Blank lines are kept and
    /// will fail to parse, like any other malformed expression. Bytes that
    /// are not valid UTF-8 are replaced with U+FFFD, so such a line fails on
    /// its own instead of rejecting the whole input.
    pub fn from_reader<R: BufRead>(source_name: impl Into<String>, mut reader: R) -> io::Result<Self> {
        let mut batch = Self::new(source_name);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            batch.add_expression(String::from_utf8_lossy(&buf).into_owned());
        }
        Ok(batch)
    }

    /// Load all expressions from a file on disk.
    pub fn load_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(path.display().to_string(), BufReader::new(file))
    }

    /// Append an expression as the next line.
    pub fn add_expression(&mut self, text: impl Into<String>) {
        let line = self.lines.len() + 1;
        self.lines.push(SourceLine {
            line,
            text: text.into(),
        });
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Evaluate every line in parallel on the current rayon pool and wait
    /// for all of them.
    pub fn evaluate(&self) -> BatchReport {
        tracing::info!(
            source = %self.source_name,
            expressions = self.lines.len(),
            threads = rayon::current_num_threads(),
            "evaluating batch"
        );
        let outcomes = self.lines.par_iter().map(evaluate_source_line).collect();
        BatchReport::new(self.source_name.clone(), outcomes)
    }

    /// Evaluate every line in parallel on `pool`.
    pub fn evaluate_in(&self, pool: &rayon::ThreadPool) -> BatchReport {
        pool.install(|| self.evaluate())
    }

    /// Evaluate every line on the calling thread, in order.
    pub fn evaluate_sequential(&self) -> BatchReport {
        tracing::info!(
            source = %self.source_name,
            expressions = self.lines.len(),
            "evaluating batch sequentially"
        );
        let outcomes = self.lines.iter().map(evaluate_source_line).collect();
        BatchReport::new(self.source_name.clone(), outcomes)
    }
}

/// Parse and evaluate one expression.
pub fn evaluate_line(text: &str) -> Result<i64, CalcError> {
    evaluate_with_tree(text).map(|evaluated| evaluated.value)
}

fn evaluate_with_tree(text: &str) -> Result<Evaluated, CalcError> {
    let tree = parse_expression(text)?;
    let value = tree.evaluate()?;
    Ok(Evaluated { value, tree })
}

fn evaluate_source_line(source: &SourceLine) -> Outcome {
    let _span = tracing::debug_span!("expression", line = source.line).entered();
    let result = evaluate_with_tree(&source.text);
    match &result {
        Ok(evaluated) => tracing::trace!(value = evaluated.value, "evaluated"),
        Err(e) => tracing::debug!(error = %e, kind = e.name(), "expression failed"),
    }
    Outcome {
        line: source.line,
        expression: source.text.clone(),
        result,
    }
}
