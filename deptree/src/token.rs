//! Tokens of a dependency-parsed sentence.

/// Marker for an absent field in CoNLL data.
pub const EMPTY_TOKEN: &str = "_";

/// A builder for `Token`s.
///
/// A CoNLL token has many fields, most of which are optional. This builder
/// provides a fluent interface for creating `Token`s.
pub struct TokenBuilder {
    token: Token,
}

impl TokenBuilder {
    /// Create a `Token` builder for the token at `index` (1-based).
    ///
    /// All the fields other than the form are absent and the token is
    /// attached to the root.
    pub fn new(index: usize, form: impl Into<String>) -> TokenBuilder {
        TokenBuilder {
            token: Token::new(index, form),
        }
    }

    /// Set the lemma or stem of the word form.
    pub fn lemma(mut self, lemma: impl Into<String>) -> TokenBuilder {
        self.token.lemma = Some(lemma.into());
        self
    }

    /// Set the coarse-grained part-of-speech tag.
    pub fn upos(mut self, upos: impl Into<String>) -> TokenBuilder {
        self.token.upos = Some(upos.into());
        self
    }

    /// Set the fine-grained part-of-speech tag.
    pub fn xpos(mut self, xpos: impl Into<String>) -> TokenBuilder {
        self.token.xpos = Some(xpos.into());
        self
    }

    /// Set the morphological features.
    ///
    /// Features are kept verbatim, they are not parsed.
    pub fn features(mut self, features: impl Into<String>) -> TokenBuilder {
        self.token.features = Some(features.into());
        self
    }

    /// Set the index of the head, 0 for the root.
    pub fn head(mut self, head: usize) -> TokenBuilder {
        self.token.head = head;
        self
    }

    /// Set the dependency relation to the head.
    pub fn relation(mut self, relation: impl Into<String>) -> TokenBuilder {
        self.token.relation = Some(relation.into());
        self
    }
}

impl From<Token> for TokenBuilder {
    fn from(token: Token) -> Self {
        TokenBuilder { token }
    }
}

impl From<TokenBuilder> for Token {
    fn from(builder: TokenBuilder) -> Self {
        builder.token
    }
}

/// A token with its head attachment.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    index: usize,
    form: String,
    lemma: Option<String>,
    upos: Option<String>,
    xpos: Option<String>,
    features: Option<String>,
    head: usize,
    relation: Option<String>,
}

impl Token {
    /// Create a new token attached to the root, where all the non-form
    /// fields are absent.
    pub fn new(index: usize, form: impl Into<String>) -> Token {
        Token {
            index,
            form: form.into(),
            lemma: None,
            upos: None,
            xpos: None,
            features: None,
            head: 0,
            relation: None,
        }
    }

    /// Get the 1-based position of the token in its sentence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the word form or punctuation symbol.
    pub fn form(&self) -> &str {
        self.form.as_ref()
    }

    /// Get the lemma or stem of the word form.
    pub fn lemma(&self) -> Option<&str> {
        self.lemma.as_deref()
    }

    /// Get the coarse-grained part-of-speech tag.
    pub fn upos(&self) -> Option<&str> {
        self.upos.as_deref()
    }

    /// Get the fine-grained part-of-speech tag.
    pub fn xpos(&self) -> Option<&str> {
        self.xpos.as_deref()
    }

    /// Get the morphological features, as they appear in the input.
    pub fn features(&self) -> Option<&str> {
        self.features.as_deref()
    }

    /// Get the features in a form that is suitable for display.
    ///
    /// Feature separators are replaced by commas, so that
    /// `Gender=Masc|Number=Sing` becomes `Gender=Masc, Number=Sing`.
    pub fn features_display(&self) -> Option<String> {
        self.features().map(|features| features.replace('|', ", "))
    }

    /// Get the index of the head, 0 if the token is the root.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Get the dependency relation to the head.
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    /// Returns `true` if the token is attached to the root.
    pub fn is_root(&self) -> bool {
        self.head == 0
    }
}
