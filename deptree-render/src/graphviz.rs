//! Graphviz rendering.
//!
//! Every tree becomes a DOT `digraph` with one node statement per token and
//! one labeled edge statement per dependency. Tokens at the same depth are
//! put on the same rank, chained by invisible edges so that every rank is
//! laid out in sentence order. The relation of the root is an external
//! label of the root node.

use std::collections::BTreeMap;
use std::fmt;

use deptree::tree::{Node, Tree};
use itertools::Itertools;

use crate::config::{LabelPosition, RenderConfig};
use crate::render::{laid_out, Render};

/// Renderer for Graphviz DOT graphs.
#[derive(Clone, Debug)]
pub struct GraphvizRenderer {
    config: RenderConfig,
}

impl GraphvizRenderer {
    pub fn new(config: RenderConfig) -> Self {
        GraphvizRenderer { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl Render for GraphvizRenderer {
    fn render(&self, tree: &Tree) -> String {
        let tree = laid_out(tree);
        DotGraph {
            config: &self.config,
            tree: &tree,
        }
        .to_string()
    }
}

struct DotGraph<'a> {
    config: &'a RenderConfig,
    tree: &'a Tree,
}

impl<'a> DotGraph<'a> {
    fn label_attr(&self) -> &'static str {
        // The tail of a DOT edge is the head of the dependency.
        match self.config.label_position {
            LabelPosition::Head => "taillabel",
            LabelPosition::Middle => "label",
            LabelPosition::Dependent => "headlabel",
        }
    }

    fn node_label(&self, node: &Node) -> String {
        let token = node.token();
        let mut lines = vec![escape(token.form())];

        if let Some(pos) = token.upos().or_else(|| token.xpos()) {
            lines.push(escape(pos));
        }

        if self.config.show_features {
            if let Some(features) = token.features_display() {
                lines.push(escape(&features));
            }
        }

        lines.join("\\n")
    }
}

impl<'a> fmt::Display for DotGraph<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "digraph sentence{} {{", self.tree.sentence())?;
        writeln!(f, "  ordering=out;")?;
        if self.config.compact {
            writeln!(f, "  graph [nodesep=0.15, ranksep=0.3];")?;
            writeln!(f, "  node [shape=plaintext, fontsize=10];")?;
        } else {
            writeln!(f, "  graph [nodesep=0.4, ranksep=0.6];")?;
            writeln!(f, "  node [shape=plaintext];")?;
        }
        writeln!(f, "  edge [arrowsize=0.6];")?;

        for node in self.tree.iter() {
            if node.is_root() {
                let xlabel = node
                    .token()
                    .relation()
                    .map(|relation| format!(", xlabel=\"{}\"", escape(relation)))
                    .unwrap_or_default();
                writeln!(
                    f,
                    "  n{} [label=\"{}\"{}, shape=box, style=\"rounded,filled\", fillcolor=lightgrey];",
                    node.index(),
                    self.node_label(node),
                    xlabel
                )?;
            } else {
                writeln!(f, "  n{} [label=\"{}\"];", node.index(), self.node_label(node))?;
            }
        }

        for node in self.tree.iter() {
            if let Some(head) = node.parent() {
                writeln!(
                    f,
                    "  n{} -> n{} [{}=\"{}\"];",
                    head,
                    node.index(),
                    self.label_attr(),
                    escape(node.token().relation().unwrap_or(""))
                )?;
            }
        }

        let mut ranks: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for node in self.tree.iter() {
            ranks
                .entry(node.layout().depth())
                .or_default()
                .push(node.layout().slot());
        }

        for (_, mut slots) in ranks.into_iter().filter(|(depth, _)| *depth > 0) {
            slots.sort_unstable();
            let chain = slots.iter().map(|slot| format!("n{}", slot)).join(" -> ");
            if slots.len() > 1 {
                writeln!(f, "  {{ rank=same; {} [style=invis]; }}", chain)?;
            } else {
                writeln!(f, "  {{ rank=same; {}; }}", chain)?;
            }
        }

        writeln!(f, "}}")
    }
}

/// Escape a string for use in a quoted DOT identifier.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use deptree::graph::Sentence;
    use deptree::token::{Token, TokenBuilder};
    use deptree::tree::Tree;
    use maplit::btreeset;

    use super::{escape, GraphvizRenderer};
    use crate::config::{LabelPosition, RenderConfig};
    use crate::render::Render;
    use crate::tests::paul_tree;

    fn render(config: RenderConfig) -> String {
        GraphvizRenderer::new(config).render(&paul_tree())
    }

    #[test]
    fn one_node_statement_per_token() {
        let dot = render(RenderConfig::default());
        assert!(dot.starts_with("digraph sentence1 {\n  ordering=out;\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("  n1 [label=\"Paul\\nPROPN\"];\n"));
        assert!(dot.contains("  n4 [label=\"the\\nDET\"];\n"));

        let nodes = dot
            .lines()
            .filter(|line| line.contains(" [label=") && !line.contains("->"))
            .count();
        assert_eq!(nodes, 5);
    }

    #[test]
    fn root_is_styled() {
        let dot = render(RenderConfig::default());
        assert!(dot.contains(
            "  n3 [label=\"drinking\\nVERB\", xlabel=\"root\", shape=box, style=\"rounded,filled\", fillcolor=lightgrey];\n"
        ));
        assert_eq!(dot.matches("fillcolor").count(), 1);
    }

    #[test]
    fn one_edge_statement_per_dependency() {
        let dot = render(RenderConfig::default());
        let edges: std::collections::BTreeSet<_> =
            dot.lines().filter(|line| line.contains(" [label=") && line.contains("->")).collect();
        assert_eq!(
            edges,
            btreeset! {
                "  n3 -> n1 [label=\"nsubj\"];",
                "  n3 -> n2 [label=\"aux\"];",
                "  n3 -> n5 [label=\"obj\"];",
                "  n5 -> n4 [label=\"det\"];",
            }
        );
    }

    #[test]
    fn ranks_follow_depth() {
        let dot = render(RenderConfig::default());
        assert!(dot.contains("  { rank=same; n1 -> n2 -> n5 [style=invis]; }\n"));
        assert!(dot.contains("  { rank=same; n4; }\n"));
        assert_eq!(dot.matches("rank=same").count(), 2);
        assert_eq!(dot.matches("style=invis").count(), 1);
    }

    #[test]
    fn ranks_are_ordered_across_subtrees() {
        // "v" hangs under "x" and "z" under "w", but "z" precedes "v".
        let sentence: Sentence = vec![
            Token::from(TokenBuilder::new(1, "x").head(2).relation("dep")),
            Token::from(TokenBuilder::new(2, "y").head(0).relation("root")),
            Token::from(TokenBuilder::new(3, "z").head(4).relation("dep")),
            Token::from(TokenBuilder::new(4, "w").head(2).relation("dep")),
            Token::from(TokenBuilder::new(5, "v").head(1).relation("dep")),
        ]
        .into_iter()
        .collect();
        let dot = GraphvizRenderer::new(RenderConfig::default())
            .render(&Tree::build(&sentence).unwrap());
        assert!(dot.contains("  { rank=same; n1 -> n4 [style=invis]; }\n"));
        assert!(dot.contains("  { rank=same; n3 -> n5 [style=invis]; }\n"));
    }

    #[test]
    fn label_positions() {
        let head = render(RenderConfig {
            label_position: LabelPosition::Head,
            ..RenderConfig::default()
        });
        assert!(head.contains("n5 -> n4 [taillabel=\"det\"];"));

        let dependent = render(RenderConfig {
            label_position: LabelPosition::Dependent,
            ..RenderConfig::default()
        });
        assert!(dependent.contains("n5 -> n4 [headlabel=\"det\"];"));
    }

    #[test]
    fn features_and_compact() {
        let dot = render(RenderConfig {
            show_features: true,
            compact: true,
            ..RenderConfig::default()
        });
        assert!(dot.contains("n2 [label=\"is\\nAUX\\nMood=Ind, Tense=Pres\"];"));
        assert!(dot.contains("n4 [label=\"the\\nDET\"];"));
        assert!(dot.contains("graph [nodesep=0.15, ranksep=0.3];"));
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape("a\\b"), "a\\\\b");

        let sentence: Sentence = vec![
            Token::from(TokenBuilder::new(1, "\"").upos("PUNCT").head(2).relation("punct")),
            Token::from(TokenBuilder::new(2, "yes").head(0).relation("root")),
        ]
        .into_iter()
        .collect();
        let dot = GraphvizRenderer::new(RenderConfig::default())
            .render(&Tree::build(&sentence).unwrap());
        assert!(dot.contains("n1 [label=\"\\\"\\nPUNCT\"];"));
        assert!(dot.contains("n2 [label=\"yes\", xlabel=\"root\", shape=box"));
    }
}
