use conll::ReadError;
use deptree::InvalidTree;
use thiserror::Error;

/// Rendering configuration error.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unknown output mode: {value:?} (expected latex or graphviz)")]
    UnknownMode { value: String },

    #[error("unknown label position: {value:?} (expected head, middle or dependent)")]
    UnknownLabelPosition { value: String },
}

/// Conversion error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The input could not be read or contains a malformed record.
    #[error(transparent)]
    Read(#[from] ReadError),

    /// A sentence does not form a dependency tree.
    #[error(transparent)]
    Tree(#[from] InvalidTree),
}

impl ConvertError {
    /// Ordinal of the sentence that caused the error, if known.
    pub fn sentence(&self) -> Option<usize> {
        match self {
            ConvertError::Read(err) => err.sentence(),
            ConvertError::Tree(err) => Some(err.sentence()),
        }
    }
}
