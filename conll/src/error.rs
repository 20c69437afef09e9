use std::io;

use thiserror::Error;

/// CoNLL read error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadError {
    /// Error in file IO.
    #[error("error reading CoNLL data")]
    IO(#[from] io::Error),

    /// A line could not be parsed as a token record.
    #[error("sentence {sentence}, line {line}: malformed record: {source}")]
    MalformedRecord {
        sentence: usize,
        line: usize,
        #[source]
        source: RecordError,
    },
}

impl ReadError {
    /// Ordinal of the sentence in which the error occurred, if known.
    pub fn sentence(&self) -> Option<usize> {
        match self {
            ReadError::IO(_) => None,
            ReadError::MalformedRecord { sentence, .. } => Some(*sentence),
        }
    }
}

/// Token record parsing errors.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum RecordError {
    /// A required field is absent.
    #[error("{field} field is missing")]
    MissingField { field: &'static str },

    /// An integer field could not be parsed as a non-negative integer.
    #[error("cannot parse {field} field as integer: {value:?}")]
    ParseIntField { field: &'static str, value: String },

    /// The token index does not follow the previous token.
    #[error("expected token index {expected}, found {found}")]
    UnexpectedIndex { expected: usize, found: usize },
}
