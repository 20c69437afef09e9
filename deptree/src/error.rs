use thiserror::Error;

/// The tokens of a sentence do not form a rooted dependency tree.
///
/// Every variant carries the ordinal of the offending sentence in its
/// input (1-based, 0 for sentences that were constructed by hand).
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum InvalidTree {
    #[error("sentence {sentence}: sentence has no tokens")]
    Empty { sentence: usize },

    #[error("sentence {sentence}: expected token index {expected}, found {found}")]
    NonContiguousIndex {
        sentence: usize,
        expected: usize,
        found: usize,
    },

    #[error("sentence {sentence}: no token is attached to the root (head 0)")]
    MissingRoot { sentence: usize },

    #[error("sentence {sentence}: multiple tokens are attached to the root: {roots:?}")]
    MultipleRoots { sentence: usize, roots: Vec<usize> },

    #[error("sentence {sentence}: head {head:?} of token {token:?} does not exist")]
    DanglingHead {
        sentence: usize,
        token: usize,
        head: usize,
    },

    #[error("sentence {sentence}: token {token:?} is part of a head cycle")]
    Cycle { sentence: usize, token: usize },
}

impl InvalidTree {
    /// Ordinal of the sentence that failed to validate.
    pub fn sentence(&self) -> usize {
        match *self {
            InvalidTree::Empty { sentence }
            | InvalidTree::NonContiguousIndex { sentence, .. }
            | InvalidTree::MissingRoot { sentence }
            | InvalidTree::MultipleRoots { sentence, .. }
            | InvalidTree::DanglingHead { sentence, .. }
            | InvalidTree::Cycle { sentence, .. } => sentence,
        }
    }
}
