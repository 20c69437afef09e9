//! Conversion of CoNLL input to rendered trees.

use std::io;

use conll::io::{ReadSentence, Reader};
use conll::ReadError;
use deptree::graph::Sentence;
use deptree::layout::layout;
use deptree::tree::Tree;
use tracing::{debug, warn};

use crate::config::{Mode, RenderConfig};
use crate::error::ConvertError;
use crate::latex::LatexRenderer;
use crate::render::{Render, Renderer};

/// What to do with a sentence that cannot be converted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorPolicy {
    /// Stop at the first error.
    Abort,

    /// Report the sentence and continue with the next one.
    Skip,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::Abort
    }
}

/// The rendering of a single sentence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Block {
    sentence: usize,
    text: String,
}

impl Block {
    /// Get the ordinal of the rendered sentence.
    pub fn sentence(&self) -> usize {
        self.sentence
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Block {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Rendered output.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Document {
    /// One LaTeX document holding all trees.
    Latex(String),

    /// One DOT graph per tree.
    Graphviz(Vec<Block>),
}

/// The result of a conversion.
#[derive(Debug)]
pub struct Output {
    document: Document,
    skipped: Vec<ConvertError>,
}

impl Output {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Get the errors of the sentences that were skipped.
    ///
    /// This is always empty with `ErrorPolicy::Abort`.
    pub fn skipped(&self) -> &[ConvertError] {
        &self.skipped
    }
}

/// Converter from CoNLL input to tree renderings.
///
/// Sentences are read, built into trees, laid out and rendered one at a
/// time.
#[derive(Clone, Debug, Default)]
pub struct Converter {
    config: RenderConfig,
    policy: ErrorPolicy,
    ignore_multiword: bool,
}

impl Converter {
    pub fn new(config: RenderConfig) -> Self {
        Converter {
            config,
            ..Converter::default()
        }
    }

    /// Set the policy for sentences that cannot be converted.
    pub fn policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Skip multiword token ranges and empty nodes in the input.
    pub fn ignore_multiword(mut self, ignore: bool) -> Self {
        self.ignore_multiword = ignore;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Convert all sentences of `read`.
    ///
    /// # Errors
    ///
    /// Input errors always abort the conversion. Malformed records and
    /// invalid trees abort the conversion under `ErrorPolicy::Abort`, and
    /// are collected in `Output::skipped` under `ErrorPolicy::Skip`.
    pub fn convert<R>(&self, read: R) -> Result<Output, ConvertError>
    where
        R: io::BufRead,
    {
        let renderer = Renderer::new(self.config);
        let reader = Reader::new(read).ignore_multiword(self.ignore_multiword);

        let mut blocks = Vec::new();
        let mut skipped = Vec::new();

        for sentence in reader.sentences() {
            let result = sentence
                .map_err(ConvertError::from)
                .and_then(|sentence| self.convert_sentence(&renderer, &sentence));

            match result {
                Ok(block) => blocks.push(block),
                Err(ConvertError::Read(ReadError::IO(err))) => {
                    return Err(ConvertError::Read(ReadError::IO(err)))
                }
                Err(err) if self.policy == ErrorPolicy::Skip => {
                    warn!(sentence = err.sentence(), "skipping sentence: {}", err);
                    skipped.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        let document = match renderer.mode() {
            Mode::Latex => Document::Latex(LatexRenderer::document(&blocks)),
            Mode::Graphviz => Document::Graphviz(blocks),
        };

        Ok(Output { document, skipped })
    }

    fn convert_sentence(
        &self,
        renderer: &Renderer,
        sentence: &Sentence,
    ) -> Result<Block, ConvertError> {
        let mut tree = Tree::build(sentence)?;
        layout(&mut tree);
        debug!(
            sentence = sentence.ordinal(),
            depth = tree.max_depth(),
            "rendering tree"
        );
        Ok(Block {
            sentence: tree.sentence(),
            text: renderer.render(&tree),
        })
    }
}
