use thiserror::Error;

/// A malformed parameter block.
///
/// Every variant carries the 1-based line where the problem was detected and,
/// once the statement header has been read, the parameter name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: param `{name}` is not terminated by `;`")]
    Unterminated { name: String, line: usize },

    #[error("line {line}: row of param `{name}` has {found} values, header declares {expected} columns")]
    RowLength {
        name: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: param `{name}`{} is declared more than once", slice_suffix(.slice))]
    Duplicate {
        name: String,
        slice: Option<usize>,
        line: usize,
    },

    #[error("line {line}: param `{name}` repeats index {index}")]
    DuplicateIndex {
        name: String,
        index: usize,
        line: usize,
    },

    #[error("line {line}: param `{name}` has an index without a value")]
    UnpairedValue { name: String, line: usize },

    #[error("line {line}: param `{name}`: `{token}` is not a number")]
    InvalidNumber {
        name: String,
        token: String,
        line: usize,
    },

    #[error("line {line}: param `{name}`: `{token}` is not a non-negative integer index")]
    InvalidIndex {
        name: String,
        token: String,
        line: usize,
    },

    #[error("line {line}: expected {expected}, found `{found}`")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        line: usize,
    },

    #[error("line {line}: expected {expected}, found end of input")]
    UnexpectedEnd { expected: &'static str, line: usize },
}

fn slice_suffix(slice: &Option<usize>) -> String {
    match slice {
        Some(key) => format!(" slice [*,*,{key}]"),
        None => String::new(),
    }
}

impl ParseError {
    /// Line on which the error was detected.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Unterminated { line, .. }
            | ParseError::RowLength { line, .. }
            | ParseError::Duplicate { line, .. }
            | ParseError::DuplicateIndex { line, .. }
            | ParseError::UnpairedValue { line, .. }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::InvalidIndex { line, .. }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::UnexpectedEnd { line, .. } => *line,
        }
    }

    /// Name of the offending parameter, when known.
    pub fn param(&self) -> Option<&str> {
        match self {
            ParseError::Unterminated { name, .. }
            | ParseError::RowLength { name, .. }
            | ParseError::Duplicate { name, .. }
            | ParseError::DuplicateIndex { name, .. }
            | ParseError::UnpairedValue { name, .. }
            | ParseError::InvalidNumber { name, .. }
            | ParseError::InvalidIndex { name, .. } => Some(name),
            ParseError::UnexpectedToken { .. } | ParseError::UnexpectedEnd { .. } => None,
        }
    }
}
