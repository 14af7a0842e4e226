use crate::traits::TokenKind;

/// The text a rule looks for at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pattern {
    /// Matches exactly this string.
    Literal(String),
    /// A regular expression (`regex` crate syntax), anchored at the cursor
    /// and compiled in multi-line mode.
    ///
    /// The expression only sees the input from the cursor onward, so a
    /// leading `\b` always finds a boundary. Look-around is not supported.
    Regex(String),
}

impl Pattern {
    /// Returns the source string of the pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Literal(text) | Pattern::Regex(text) => text,
        }
    }
}

/// A change to the state stack applied after a rule matches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transition {
    /// Enter the named state on top of the current one.
    Push(String),
    /// Leave the current state. The initial state is never left.
    Pop,
    /// Replace the current state with the named one.
    Switch(String),
}

/// An alternative kind/transition chosen when a named capture group takes
/// part in the match.
#[derive(Debug, Clone)]
pub(crate) struct CaptureBranch<K> {
    pub(crate) group: String,
    pub(crate) kind: K,
    pub(crate) transition: Option<Transition>,
}

/// Maps matched text to a more specific kind.
pub(crate) struct Classifier<K>(pub(crate) fn(&str) -> Option<K>);

impl<K> Clone for Classifier<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Classifier<K> {}

impl<K> std::fmt::Debug for Classifier<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Classifier")
    }
}

/// A single matching rule: pattern, token kind and optional transition.
///
/// Rules are plain data, assembled with the builder methods below and then
/// handed to [`GrammarBuilder::define_state`](crate::GrammarBuilder::define_state),
/// which compiles and validates them.
///
/// ```ignore
/// Rule::literal("#{", Kind::EmbedStart).push("embedded")
/// Rule::regex(r"[a-z]+", Kind::Word).classify(keyword_or_word).ends_argument()
/// ```
#[derive(Debug, Clone)]
pub struct Rule<K> {
    pub(crate) pattern: Pattern,
    pub(crate) kind: K,
    pub(crate) transition: Option<Transition>,
    pub(crate) branches: Vec<CaptureBranch<K>>,
    pub(crate) classifier: Option<Classifier<K>>,
    pub(crate) ends_argument: bool,
}

impl<K: TokenKind> Rule<K> {
    fn with_pattern(pattern: Pattern, kind: K) -> Self {
        Self {
            pattern,
            kind,
            transition: None,
            branches: Vec::new(),
            classifier: None,
            ends_argument: false,
        }
    }

    /// A rule matching a fixed string.
    pub fn literal(text: impl Into<String>, kind: K) -> Self {
        Self::with_pattern(Pattern::Literal(text.into()), kind)
    }

    /// A rule matching a regular expression.
    pub fn regex(pattern: impl Into<String>, kind: K) -> Self {
        Self::with_pattern(Pattern::Regex(pattern.into()), kind)
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Enters `state` after matching.
    pub fn push(self, state: impl Into<String>) -> Self {
        self.with_transition(Transition::Push(state.into()))
    }

    /// Leaves the current state after matching.
    pub fn pop(self) -> Self {
        self.with_transition(Transition::Pop)
    }

    /// Replaces the current state with `state` after matching.
    pub fn switch(self, state: impl Into<String>) -> Self {
        self.with_transition(Transition::Switch(state.into()))
    }

    /// When the named capture `group` participates in the match, the token
    /// gets `kind` and `transition` instead of the rule's defaults.
    ///
    /// Branches are tried in the order they were added.
    pub fn on_capture(
        mut self,
        group: impl Into<String>,
        kind: K,
        transition: Option<Transition>,
    ) -> Self {
        self.branches.push(CaptureBranch {
            group: group.into(),
            kind,
            transition,
        });
        self
    }

    /// Refines the token kind from the matched text. Returning `None` keeps
    /// the rule's kind.
    pub fn classify(mut self, classifier: fn(&str) -> Option<K>) -> Self {
        self.classifier = Some(Classifier(classifier));
        self
    }

    /// Marks the token as completing an item, which leaves every enclosing
    /// single-argument state.
    pub fn ends_argument(mut self) -> Self {
        self.ends_argument = true;
        self
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }
}
