use std::borrow::Cow;

use deptree::layout::layout;
use deptree::tree::Tree;

use crate::config::{Mode, RenderConfig};
use crate::graphviz::GraphvizRenderer;
use crate::latex::LatexRenderer;

/// Tree renderer.
pub trait Render {
    /// Render a tree.
    ///
    /// Returns a self-contained block of text. Trees that were not laid
    /// out yet are laid out on a copy.
    fn render(&self, tree: &Tree) -> String;
}

/// A renderer for any of the supported output modes.
#[derive(Clone, Debug)]
pub enum Renderer {
    Latex(LatexRenderer),
    Graphviz(GraphvizRenderer),
}

impl Renderer {
    /// Construct the renderer for the mode of `config`.
    pub fn new(config: RenderConfig) -> Self {
        match config.mode {
            Mode::Latex => Renderer::Latex(LatexRenderer::new(config)),
            Mode::Graphviz => Renderer::Graphviz(GraphvizRenderer::new(config)),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Renderer::Latex(_) => Mode::Latex,
            Renderer::Graphviz(_) => Mode::Graphviz,
        }
    }
}

impl Render for Renderer {
    fn render(&self, tree: &Tree) -> String {
        match self {
            Renderer::Latex(renderer) => renderer.render(tree),
            Renderer::Graphviz(renderer) => renderer.render(tree),
        }
    }
}

pub(crate) fn laid_out(tree: &Tree) -> Cow<Tree> {
    if tree.is_laid_out() {
        Cow::Borrowed(tree)
    } else {
        let mut tree = tree.clone();
        layout(&mut tree);
        Cow::Owned(tree)
    }
}
