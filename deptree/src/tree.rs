//! Dependency trees.
//!
//! A `Tree` is built from the flat token list of a `Sentence`. Building
//! validates that the head relations form exactly one rooted, acyclic
//! tree; the resulting root `Node` owns all other nodes through its
//! children.

use std::collections::HashSet;
use std::convert::TryFrom;
use std::iter;

use tracing::debug;

use crate::error::InvalidTree;
use crate::graph::{DepTriple, Sentence};
use crate::layout::{Layout, Span};
use crate::token::Token;

/// Dependency tree node.
///
/// The parent is stored by token index, children are owned and ordered
/// by ascending token index.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    token: Token,
    pub(crate) children: Vec<Node>,
    pub(crate) layout: Layout,
}

impl Node {
    fn new(token: Token) -> Self {
        Node {
            token,
            children: Vec::new(),
            layout: Layout::default(),
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Get the token index of this node.
    pub fn index(&self) -> usize {
        self.token.index()
    }

    /// Get the token index of the parent, `None` for the root.
    pub fn parent(&self) -> Option<usize> {
        if self.token.is_root() {
            None
        } else {
            Some(self.token.head())
        }
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.token.is_root()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Get the layout attributes of this node.
    ///
    /// All attributes are zero until the tree is laid out.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get a pre-order iterator over this node and its descendants.
    pub fn iter(&self) -> Iter {
        Iter { stack: vec![self] }
    }
}

/// A dependency tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tree {
    sentence: usize,
    len: usize,
    root: Node,
    pub(crate) laid_out: bool,
}

#[allow(clippy::len_without_is_empty)]
impl Tree {
    /// Build the dependency tree of a sentence.
    ///
    /// Fails when the sentence is empty, has no root or several roots,
    /// has a head that refers to a token outside the sentence, or when
    /// the head relation contains a cycle.
    pub fn build(sentence: &Sentence) -> Result<Tree, InvalidTree> {
        let ordinal = sentence.ordinal();

        if sentence.is_empty() {
            return Err(InvalidTree::Empty { sentence: ordinal });
        }

        let graph = sentence.dep_graph()?;
        let root = match graph.roots().as_slice() {
            [] => return Err(InvalidTree::MissingRoot { sentence: ordinal }),
            [root] => *root,
            roots => {
                return Err(InvalidTree::MultipleRoots {
                    sentence: ordinal,
                    roots: roots.to_vec(),
                })
            }
        };

        let distances = root_distances(sentence)?;

        // Attach the deepest nodes first, so that a node has collected all
        // of its dependents before it is moved under its own head.
        let mut order: Vec<usize> = (1..=sentence.len()).collect();
        order.sort_by(|&a, &b| distances[b].cmp(&distances[a]).then(a.cmp(&b)));

        let mut nodes: Vec<Option<Node>> = iter::once(None)
            .chain(sentence.iter().cloned().map(|token| Some(Node::new(token))))
            .collect();

        for index in order {
            let head = match graph.head(index) {
                Some(triple) if triple.head() != 0 => triple.head(),
                _ => continue,
            };

            if let Some(node) = nodes[index].take() {
                if let Some(parent) = nodes[head].as_mut() {
                    parent.children.push(node);
                }
            }
        }

        let root = nodes[root]
            .take()
            .ok_or(InvalidTree::MissingRoot { sentence: ordinal })?;

        debug!(
            sentence = ordinal,
            tokens = sentence.len(),
            root = root.index(),
            "built dependency tree"
        );

        Ok(Tree {
            sentence: ordinal,
            len: sentence.len(),
            root,
            laid_out: false,
        })
    }

    /// Get the ordinal of the sentence this tree was built from.
    pub fn sentence(&self) -> usize {
        self.sentence
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when layout attributes have been computed.
    pub fn is_laid_out(&self) -> bool {
        self.laid_out
    }

    /// Get the depth of the deepest node.
    pub fn max_depth(&self) -> usize {
        self.root.layout.height()
    }

    /// Get the slots covered by the tree.
    pub fn span(&self) -> Span {
        self.root.layout.span()
    }

    /// Get a pre-order iterator over the nodes of the tree.
    pub fn iter(&self) -> Iter {
        self.root.iter()
    }

    /// Find the node of the token with the given index.
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.iter().find(|node| node.index() == index)
    }

    /// Get the head relations of all the non-root nodes.
    pub fn triples(&self) -> Vec<DepTriple<&str>> {
        self.iter()
            .filter_map(|node| {
                node.parent()
                    .map(|head| DepTriple::new(head, node.token().relation(), node.index()))
            })
            .collect()
    }
}

impl TryFrom<&Sentence> for Tree {
    type Error = InvalidTree;

    fn try_from(sentence: &Sentence) -> Result<Self, Self::Error> {
        Tree::build(sentence)
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over tree nodes.
///
/// Children are visited in ascending token order.
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Compute, for every token, the number of head links up to the
/// artificial root.
///
/// Each walk keeps a visited set and stops at the first token whose
/// distance is already known, so no walk is longer than the sentence.
/// A walk that revisits a token has found a cycle. The heads must have
/// been checked to be in bounds.
fn root_distances(sentence: &Sentence) -> Result<Vec<usize>, InvalidTree> {
    let tokens = sentence.tokens();
    let mut distances: Vec<Option<usize>> = vec![None; tokens.len() + 1];
    distances[0] = Some(0);

    for start in 1..=tokens.len() {
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        let mut current = start;

        let base = loop {
            if let Some(distance) = distances[current] {
                break distance;
            }

            if !visited.insert(current) {
                return Err(InvalidTree::Cycle {
                    sentence: sentence.ordinal(),
                    token: current,
                });
            }

            path.push(current);
            current = tokens[current - 1].head();
        };

        for (offset, &index) in path.iter().rev().enumerate() {
            distances[index] = Some(base + offset + 1);
        }
    }

    Ok(distances.into_iter().map(|d| d.unwrap_or(0)).collect())
}
