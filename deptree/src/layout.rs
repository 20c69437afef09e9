//! Tree layout.
//!
//! Layout assigns every node a horizontal slot and a depth. The slot of a
//! node is the index of its token, so that the leaves of a drawn tree can
//! be read in sentence order. The depth is the number of edges between the
//! node and the root. In addition, every node records the slots covered by
//! its subtree and the height of its subtree, which renderers use to
//! size drawings.

use std::cmp;

use crate::tree::{Node, Tree};

/// An inclusive range of horizontal slots.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Construct a span, the bounds are reordered when necessary.
    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start: cmp::min(start, end),
            end: cmp::max(start, end),
        }
    }

    /// Get the leftmost slot.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the rightmost slot.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the number of slots in the span.
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.start <= slot && slot <= self.end
    }

    /// Get the smallest span that covers both spans.
    pub fn union(self, other: Span) -> Span {
        Span {
            start: cmp::min(self.start, other.start),
            end: cmp::max(self.end, other.end),
        }
    }
}

/// Layout attributes of a node.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Layout {
    depth: usize,
    slot: usize,
    span: Span,
    height: usize,
}

impl Layout {
    /// Get the number of edges from the root to the node.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Get the horizontal slot, which equals the token index.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Get the slots covered by the subtree of the node.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the number of edges from the node to its deepest descendant.
    pub fn height(&self) -> usize {
        self.height
    }
}

/// Lay out a tree.
///
/// Computes the layout attributes of every node in a single post-order
/// pass. Laying out a tree again yields the same attributes.
pub fn layout(tree: &mut Tree) {
    layout_node(tree.root_mut(), 0);
    tree.laid_out = true;
}

fn layout_node(node: &mut Node, depth: usize) -> Layout {
    let slot = node.index();
    let mut span = Span::new(slot, slot);
    let mut height = 0;

    for child in &mut node.children {
        let child_layout = layout_node(child, depth + 1);
        span = span.union(child_layout.span);
        height = cmp::max(height, child_layout.height + 1);
    }

    node.layout = Layout {
        depth,
        slot,
        span,
        height,
    };

    node.layout
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use maplit::btreemap;

    use super::{layout, Span};
    use crate::tests::{sentence, PAUL};
    use crate::tree::Tree;

    fn laid_out_paul() -> Tree {
        let mut tree = Tree::build(&PAUL).unwrap();
        layout(&mut tree);
        tree
    }

    #[test]
    fn slots_follow_token_order() {
        let tree = laid_out_paul();
        assert!(tree.is_laid_out());
        for node in &tree {
            assert_eq!(node.layout().slot(), node.index());
        }
    }

    #[test]
    fn depths() {
        let tree = laid_out_paul();
        let depths: BTreeMap<usize, usize> = tree
            .iter()
            .map(|node| (node.index(), node.layout().depth()))
            .collect();
        assert_eq!(
            btreemap! { 1 => 1, 2 => 1, 3 => 0, 4 => 2, 5 => 1 },
            depths
        );
        assert_eq!(tree.max_depth(), 2);
    }

    #[test]
    fn spans_cover_subtrees() {
        let tree = laid_out_paul();
        assert_eq!(tree.span(), Span::new(1, 5));
        assert_eq!(tree.node(5).unwrap().layout().span(), Span::new(4, 5));
        assert_eq!(tree.node(4).unwrap().layout().span(), Span::new(4, 4));
        assert_eq!(tree.node(5).unwrap().layout().height(), 1);
        assert_eq!(tree.node(1).unwrap().layout().height(), 0);
    }

    #[test]
    fn layout_is_idempotent() {
        let mut tree = laid_out_paul();
        let first = tree.clone();
        layout(&mut tree);
        assert_eq!(first, tree);
    }

    #[test]
    fn non_projective_span() {
        // "c" is attached to "a" across "b".
        let mut tree =
            Tree::build(&sentence(1, &[("a", 2, "dep"), ("b", 0, "root"), ("c", 1, "dep")]))
                .unwrap();
        layout(&mut tree);
        assert_eq!(tree.node(1).unwrap().layout().span(), Span::new(1, 3));
        assert!(tree.node(1).unwrap().layout().span().contains(2));
    }

    #[test]
    fn span_helpers() {
        let span = Span::new(5, 2);
        assert_eq!(span.start(), 2);
        assert_eq!(span.end(), 5);
        assert_eq!(span.width(), 4);
        assert_eq!(span.union(Span::new(7, 7)), Span::new(2, 7));
    }
}
