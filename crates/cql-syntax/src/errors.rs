use pest::Position;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A recoverable syntax error found while parsing a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    /// Byte offset into the filter text.
    pub offset: usize,
    pub message: String,
}

impl SyntaxError {
    /// Builds an error located at `offset`, resolving line and column
    /// (both 1-based, columns counted in characters) against `input`.
    pub fn at(input: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = Position::new(input, offset)
            .map(|pos| pos.line_col())
            .unwrap_or((1, offset + 1));

        Self {
            line,
            column,
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 1 {
            write!(
                f,
                "syntax error at line {}, column {}: {}",
                self.line, self.column, self.message
            )
        } else {
            write!(f, "syntax error at column {}: {}", self.column, self.message)
        }
    }
}

/// Receives syntax errors as the parser encounters them.
pub trait ErrorListener {
    fn syntax_error(&mut self, error: SyntaxError);
}

/// Accumulates every syntax error of one parse, in the order reported.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<SyntaxError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// All errors joined into one message, position annotations included.
    pub fn combined_message(&self) -> String {
        join(&self.errors)
    }

    /// Converts the collected errors into a result: `Ok` when nothing was reported.
    pub fn finish(self) -> Result<(), SyntaxErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SyntaxErrors(self.errors))
        }
    }
}

impl ErrorListener for ErrorCollector {
    fn syntax_error(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }
}

/// Non-empty, ordered list of syntax errors for one filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", join(.0))]
pub struct SyntaxErrors(Vec<SyntaxError>);

impl SyntaxErrors {
    pub fn iter(&self) -> impl Iterator<Item = &SyntaxError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn join(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
