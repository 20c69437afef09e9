//! LaTeX rendering.
//!
//! Trees are drawn as TikZ pictures. Every token becomes a node in the
//! column of its layout slot and the row of its depth, so that the tokens
//! can be read from left to right in sentence order. Columns are widened
//! to fit the estimated width of their text. Each dependency is drawn as a
//! straight edge from the bottom of the head to the top of the dependent,
//! labeled with the relation. The relation of the root is put above it.

use std::fmt;

use deptree::tree::{Node, Tree};

use crate::config::{LabelPosition, RenderConfig};
use crate::render::{laid_out, Render};

static PREAMBLE: &str = "\\documentclass[10pt,landscape]{article}
\\usepackage[a2paper,margin=1cm]{geometry}
\\usepackage{tikz}
\\pagestyle{empty}
\\begin{document}
";

/// Approximate character widths in centimeters for the normal, small and
/// tiny font sizes.
const NORMAL_CHAR: f64 = 0.18;
const SMALL_CHAR: f64 = 0.16;
const TINY_CHAR: f64 = 0.1;

/// Horizontal space between the texts of adjacent slots.
const COLUMN_GAP: f64 = 0.3;

/// Renderer for TikZ pictures.
#[derive(Clone, Debug)]
pub struct LatexRenderer {
    config: RenderConfig,
}

impl LatexRenderer {
    pub fn new(config: RenderConfig) -> Self {
        LatexRenderer { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Wrap rendered trees in a standalone document.
    ///
    /// Every tree is put on its own page.
    pub fn document<S>(blocks: &[S]) -> String
    where
        S: AsRef<str>,
    {
        let mut document = String::from(PREAMBLE);
        for block in blocks {
            document.push('\n');
            document.push_str(block.as_ref());
        }
        document.push_str("\n\\end{document}\n");
        document
    }
}

impl Render for LatexRenderer {
    fn render(&self, tree: &Tree) -> String {
        let tree = laid_out(tree);
        LatexPicture {
            config: &self.config,
            tree: &tree,
        }
        .to_string()
    }
}

struct LatexPicture<'a> {
    config: &'a RenderConfig,
    tree: &'a Tree,
}

impl<'a> LatexPicture<'a> {
    /// Minimum slot width and depth separation in centimeters.
    fn separation(&self) -> (f64, f64) {
        if self.config.compact {
            (1.2, 1.2)
        } else {
            (1.8, 2.0)
        }
    }

    fn label_pos(&self) -> f64 {
        match self.config.label_position {
            LabelPosition::Head => 0.25,
            LabelPosition::Middle => 0.5,
            LabelPosition::Dependent => 0.75,
        }
    }

    fn node_text(&self, node: &Node) -> String {
        let token = node.token();
        let mut text = escape(token.form());

        if let Some(pos) = token.upos().or_else(|| token.xpos()) {
            text.push_str(&format!("\\\\{{\\small {}}}", escape(pos)));
        }

        if self.config.show_features {
            if let Some(features) = token.features_display() {
                text.push_str(&format!("\\\\{{\\tiny {}}}", escape(&features)));
            }
        }

        text
    }

    /// Estimate the width of the text of a node in centimeters.
    fn text_width(&self, node: &Node) -> f64 {
        let token = node.token();
        let mut width = token.form().chars().count() as f64 * NORMAL_CHAR;

        if let Some(pos) = token.upos().or_else(|| token.xpos()) {
            width = width.max(pos.chars().count() as f64 * SMALL_CHAR);
        }

        if self.config.show_features {
            if let Some(features) = token.features_display() {
                width = width.max(features.chars().count() as f64 * TINY_CHAR);
            }
        }

        width
    }

    /// Place the slots from left to right, each as wide as its text.
    fn columns(&self) -> Columns {
        let (min_width, _) = self.separation();
        let span = self.tree.span();

        let mut widths = vec![min_width; span.width()];
        for node in self.tree.iter() {
            let width = &mut widths[node.layout().slot() - span.start()];
            *width = width.max(self.text_width(node) + COLUMN_GAP);
        }

        let mut centers = Vec::with_capacity(widths.len());
        let mut left = 0.0;
        for width in widths {
            centers.push(left + width / 2.0);
            left += width;
        }

        Columns {
            first: span.start(),
            centers,
            width: left,
        }
    }
}

/// Horizontal positions of the slots of a tree.
struct Columns {
    first: usize,
    centers: Vec<f64>,
    width: f64,
}

impl Columns {
    fn center(&self, slot: usize) -> f64 {
        self.centers[slot - self.first]
    }
}

impl<'a> fmt::Display for LatexPicture<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (_, y) = self.separation();
        let columns = self.columns();

        writeln!(f, "% sentence {}", self.tree.sentence())?;
        writeln!(f, "\\begin{{center}}")?;
        writeln!(f, "\\begin{{tikzpicture}}[x=1cm, y={}cm,", y)?;
        writeln!(
            f,
            "  dep node/.style={{align=center, anchor=north, inner sep=2pt}},"
        )?;
        writeln!(
            f,
            "  dep root/.style={{dep node, draw, rounded corners, fill=black!10}},"
        )?;
        writeln!(
            f,
            "  dep label/.style={{font=\\scriptsize, fill=white, inner sep=1pt}}]"
        )?;

        writeln!(
            f,
            "\\path[use as bounding box] (0, 0.5) rectangle ({:.2}, {});",
            columns.width,
            -(self.tree.max_depth() as f64) - 0.5
        )?;

        // Pre-order, so that heads are declared before their edges.
        for node in self.tree.iter() {
            let layout = node.layout();
            let style = if node.is_root() { "dep root" } else { "dep node" };
            writeln!(
                f,
                "\\node[{}] (n{}) at ({:.2}, {}) {{{}}};",
                style,
                node.index(),
                columns.center(layout.slot()),
                -(layout.depth() as i64),
                self.node_text(node)
            )?;

            let relation = node.token().relation().map(escape);
            let head = match node.parent() {
                Some(head) => head,
                None => {
                    if let Some(relation) = relation {
                        writeln!(
                            f,
                            "\\node[dep label, anchor=south] at (n{}.north) {{{}}};",
                            node.index(),
                            relation
                        )?;
                    }
                    continue;
                }
            };

            match relation {
                Some(relation) => writeln!(
                    f,
                    "\\draw (n{}.south) -- node[dep label, pos={}] {{{}}} (n{}.north);",
                    head,
                    self.label_pos(),
                    relation,
                    node.index()
                )?,
                None => writeln!(f, "\\draw (n{}.south) -- (n{}.north);", head, node.index())?,
            }
        }

        writeln!(f, "\\end{{tikzpicture}}")?;
        writeln!(f, "\\end{{center}}")?;
        writeln!(f, "\\clearpage")
    }
}

/// Escape characters that have a special meaning in LaTeX.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '#' | '$' | '%' | '&' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }

    escaped
}
