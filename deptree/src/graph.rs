//! Sentences and their dependency graphs.

use std::borrow::Borrow;
use std::iter::FromIterator;
use std::slice;

use petgraph::graph::{node_index, DiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::InvalidTree;
use crate::token::Token;

/// A dependency triple.
///
/// A dependency triple consists of: a head index; a dependent index; and
/// an optional dependency label.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DepTriple<S> {
    head: usize,
    dependent: usize,
    relation: Option<S>,
}

impl<S> DepTriple<S> {
    /// Construct a new dependency triple.
    pub fn new(head: usize, relation: Option<S>, dependent: usize) -> Self {
        DepTriple {
            head,
            dependent,
            relation,
        }
    }

    /// Get the dependent.
    pub fn dependent(&self) -> usize {
        self.dependent
    }

    /// Get the head.
    pub fn head(&self) -> usize {
        self.head
    }
}

impl<S> DepTriple<S>
where
    S: Borrow<str>,
{
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_ref().map(Borrow::borrow)
    }
}

/// A sentence of a dependency-parsed text.
///
/// A `Sentence` is a flat sequence of tokens, each of which points to its
/// head by index. The sentence also records where it was found in the
/// input, so that errors can be traced back to it.
#[derive(Clone, Debug, Default)]
pub struct Sentence {
    ordinal: usize,
    line: Option<usize>,
    tokens: Vec<Token>,
}

impl Sentence {
    /// Construct a new, empty sentence.
    pub fn new() -> Self {
        Sentence::default()
    }

    /// Get the 1-based position of the sentence in its input.
    ///
    /// Sentences that were not read from an input have ordinal 0.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn set_ordinal(&mut self, ordinal: usize) {
        self.ordinal = ordinal;
    }

    /// Get the input line of the first token, if known.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn set_line(&mut self, line: usize) {
        self.line = Some(line);
    }

    /// Add a token to the sentence.
    ///
    /// Tokens should always be pushed in sentence order. Returns the
    /// index of the token.
    pub fn push(&mut self, token: Token) -> usize {
        let index = token.index();
        self.tokens.push(token);
        index
    }

    /// Get the tokens in sentence order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get the token with the given (1-based) index.
    pub fn token(&self, index: usize) -> Option<&Token> {
        index
            .checked_sub(1)
            .and_then(|position| self.tokens.get(position))
            .filter(|token| token.index() == index)
    }

    /// Get an iterator over the tokens.
    pub fn iter(&self) -> slice::Iter<Token> {
        self.tokens.iter()
    }

    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get the head relations of all tokens that are not attached to
    /// the root.
    pub fn triples(&self) -> impl Iterator<Item = DepTriple<&str>> {
        self.tokens
            .iter()
            .filter(|token| !token.is_root())
            .map(|token| DepTriple::new(token.head(), token.relation(), token.index()))
    }

    /// Get the dependency graph of the sentence.
    ///
    /// Vertex 0 of the graph is the artificial root, vertex *i* is the
    /// token with index *i*. Construction fails when the token indices
    /// are not contiguous or when a head does not refer to a token of
    /// this sentence.
    pub fn dep_graph(&self) -> Result<DepGraph, InvalidTree> {
        let node_count = self.tokens.len() + 1;
        let mut graph = DiGraph::with_capacity(node_count, self.tokens.len());
        for _ in 0..node_count {
            graph.add_node(());
        }

        for (position, token) in self.tokens.iter().enumerate() {
            if token.index() != position + 1 {
                return Err(InvalidTree::NonContiguousIndex {
                    sentence: self.ordinal,
                    expected: position + 1,
                    found: token.index(),
                });
            }
        }

        for token in &self.tokens {
            if token.head() >= node_count {
                return Err(InvalidTree::DanglingHead {
                    sentence: self.ordinal,
                    token: token.index(),
                    head: token.head(),
                });
            }

            graph.add_edge(
                node_index(token.head()),
                node_index(token.index()),
                token.relation(),
            );
        }

        Ok(DepGraph { inner: graph })
    }
}

impl FromIterator<Token> for Sentence {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Token>,
    {
        let mut sentence = Sentence::new();
        for token in iter {
            sentence.push(token);
        }
        sentence
    }
}

impl Eq for Sentence {}

// The input line is provenance, not content.
impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool {
        self.ordinal == other.ordinal && self.tokens == other.tokens
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a Token;
    type IntoIter = slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A graph view of the head relations of a sentence.
///
/// The view can be used to retrieve the dependents of a head or the head
/// of a dependent.
pub struct DepGraph<'a> {
    inner: DiGraph<(), Option<&'a str>>,
}

#[allow(clippy::len_without_is_empty)]
impl<'a> DepGraph<'a> {
    /// Return the dependents of `head`, ordered by index.
    pub fn dependents(&self, head: usize) -> Vec<DepTriple<&'a str>> {
        if head >= self.inner.node_count() {
            return Vec::new();
        }

        let mut dependents: Vec<_> = self
            .inner
            .edges_directed(node_index(head), Direction::Outgoing)
            .map(|e| DepTriple::new(e.source().index(), *e.weight(), e.target().index()))
            .collect();
        dependents.sort_by_key(DepTriple::dependent);
        dependents
    }

    /// Return the head relation of `dependent`, if any.
    pub fn head(&self, dependent: usize) -> Option<DepTriple<&'a str>> {
        if dependent >= self.inner.node_count() {
            return None;
        }

        self.inner
            .edges_directed(node_index(dependent), Direction::Incoming)
            .next()
            .map(|e| DepTriple::new(e.source().index(), *e.weight(), e.target().index()))
    }

    /// Return the indices of the tokens that are attached to the root.
    pub fn roots(&self) -> Vec<usize> {
        self.dependents(0)
            .iter()
            .map(DepTriple::dependent)
            .collect()
    }

    /// Get the number of vertices in the graph.
    ///
    /// This is equal to the number of tokens, plus one root vertex.
    pub fn len(&self) -> usize {
        self.inner.node_count()
    }
}
