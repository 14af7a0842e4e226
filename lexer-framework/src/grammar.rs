use crate::error::GrammarError;
use crate::rule::{Classifier, Pattern, Rule, Transition};
use crate::state::StateStack;
use crate::traits::TokenKind;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

/// Index of a state inside its grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-state behavior switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateOptions {
    /// The state is left automatically as soon as one complete item has been
    /// lexed in it (see [`Rule::ends_argument`]).
    pub single_argument: bool,
    /// When no rule matches, leave the state without consuming input and
    /// retry in the enclosing state.
    pub fallthrough: bool,
}

impl StateOptions {
    pub fn single_argument() -> Self {
        Self {
            single_argument: true,
            ..Self::default()
        }
    }

    pub fn fallthrough(mut self) -> Self {
        self.fallthrough = true;
        self
    }
}

/// A state transition with the target resolved to a [`StateId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Push(StateId),
    Pop,
    Switch(StateId),
}

/// The outcome of a successful [`Grammar::match_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch<K> {
    pub kind: K,
    /// Matched length in bytes, never zero.
    pub len: usize,
    pub action: Option<Action>,
    pub ends_argument: bool,
}

#[derive(Debug)]
enum Matcher {
    Literal(String),
    Regex(Regex),
}

#[derive(Debug)]
struct CompiledBranch<K, T> {
    group: usize,
    kind: K,
    transition: Option<T>,
}

/// A rule after validation. `T` is `Transition` while the grammar is being
/// assembled and `Action` once state names are resolved.
#[derive(Debug)]
struct CompiledRule<K, T> {
    matcher: Matcher,
    kind: K,
    transition: Option<T>,
    branches: Vec<CompiledBranch<K, T>>,
    classifier: Option<Classifier<K>>,
    ends_argument: bool,
}

impl<K: TokenKind> CompiledRule<K, Transition> {
    fn compile(state: &str, rule: Rule<K>) -> Result<Self, GrammarError> {
        if rule.pattern.as_str().is_empty() {
            return Err(GrammarError::EmptyPattern(state.to_string()));
        }
        let matcher = match &rule.pattern {
            Pattern::Literal(text) => Matcher::Literal(text.clone()),
            Pattern::Regex(source) => {
                let regex = RegexBuilder::new(&format!(r"\A(?:{source})"))
                    .multi_line(true)
                    .build()
                    .map_err(|source_err| GrammarError::InvalidPattern {
                        state: state.to_string(),
                        pattern: source.clone(),
                        source: source_err,
                    })?;
                Matcher::Regex(regex)
            }
        };

        let mut branches = Vec::with_capacity(rule.branches.len());
        for branch in rule.branches {
            let group = match &matcher {
                Matcher::Regex(regex) => regex
                    .capture_names()
                    .position(|name| name == Some(branch.group.as_str())),
                Matcher::Literal(_) => None,
            }
            .ok_or_else(|| GrammarError::UnknownCaptureGroup {
                group: branch.group.clone(),
                pattern: rule.pattern.as_str().to_string(),
            })?;
            branches.push(CompiledBranch {
                group,
                kind: branch.kind,
                transition: branch.transition,
            });
        }

        Ok(Self {
            matcher,
            kind: rule.kind,
            transition: rule.transition,
            branches,
            classifier: rule.classifier,
            ends_argument: rule.ends_argument,
        })
    }

    fn resolve(
        self,
        state: &str,
        index: &HashMap<String, StateId>,
    ) -> Result<CompiledRule<K, Action>, GrammarError> {
        let resolve = |transition: Option<Transition>| -> Result<Option<Action>, GrammarError> {
            let lookup = |target: String| {
                index
                    .get(&target)
                    .copied()
                    .ok_or_else(|| GrammarError::UndefinedState {
                        from: state.to_string(),
                        target,
                    })
            };
            Ok(match transition {
                None => None,
                Some(Transition::Pop) => Some(Action::Pop),
                Some(Transition::Push(target)) => Some(Action::Push(lookup(target)?)),
                Some(Transition::Switch(target)) => Some(Action::Switch(lookup(target)?)),
            })
        };

        let mut branches = Vec::with_capacity(self.branches.len());
        for branch in self.branches {
            branches.push(CompiledBranch {
                group: branch.group,
                kind: branch.kind,
                transition: resolve(branch.transition)?,
            });
        }

        Ok(CompiledRule {
            matcher: self.matcher,
            kind: self.kind,
            transition: resolve(self.transition)?,
            branches,
            classifier: self.classifier,
            ends_argument: self.ends_argument,
        })
    }
}

impl<K: TokenKind> CompiledRule<K, Action> {
    /// Cheap rejection based on the first character of the input.
    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        match &self.matcher {
            Matcher::Literal(text) => Some(text.chars().next() == first_char),
            Matcher::Regex(_) => None,
        }
    }

    fn try_match(&self, haystack: &str) -> Option<RuleMatch<K>> {
        let (len, kind, action) = match &self.matcher {
            Matcher::Literal(text) => {
                if !haystack.starts_with(text.as_str()) {
                    return None;
                }
                (text.len(), self.kind, self.transition)
            }
            Matcher::Regex(regex) if self.branches.is_empty() => {
                (regex.find(haystack)?.end(), self.kind, self.transition)
            }
            Matcher::Regex(regex) => {
                let captures = regex.captures(haystack)?;
                let len = captures.get(0).map_or(0, |m| m.end());
                match self
                    .branches
                    .iter()
                    .find(|branch| captures.get(branch.group).is_some())
                {
                    Some(branch) => (len, branch.kind, branch.transition),
                    None => (len, self.kind, self.transition),
                }
            }
        };

        // A zero-length match would stall the lexer.
        if len == 0 {
            return None;
        }

        let kind = self
            .classifier
            .and_then(|classifier| (classifier.0)(&haystack[..len]))
            .unwrap_or(kind);

        Some(RuleMatch {
            kind,
            len,
            action,
            ends_argument: self.ends_argument,
        })
    }
}

/// A named, ordered list of rules plus the kind used for unmatched input.
#[derive(Debug)]
pub struct LexerState<K> {
    name: String,
    rules: Vec<CompiledRule<K, Action>>,
    fallback: K,
    options: StateOptions,
}

impl<K: TokenKind> LexerState<K> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind of the one-character token emitted when no rule matches.
    pub fn fallback(&self) -> K {
        self.fallback
    }

    pub fn options(&self) -> StateOptions {
        self.options
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Tries each rule in declaration order at the start of `haystack`.
    fn match_start(&self, haystack: &str) -> Option<RuleMatch<K>> {
        let first_char = haystack.chars().next();
        for rule in &self.rules {
            if let Some(false) = rule.quick_check(first_char) {
                continue;
            }
            if let Some(found) = rule.try_match(haystack) {
                return Some(found);
            }
        }
        None
    }
}

#[derive(Debug)]
struct PendingState<K> {
    name: String,
    rules: Vec<CompiledRule<K, Transition>>,
    fallback: K,
    options: StateOptions,
}

/// Collects state definitions and produces an immutable [`Grammar`].
///
/// Patterns are compiled as each state is defined; transition targets are
/// resolved in [`build`](Self::build), so states may refer to each other in
/// any order.
#[derive(Debug)]
pub struct GrammarBuilder<K> {
    name: String,
    states: Vec<PendingState<K>>,
    index: HashMap<String, StateId>,
    initial: Option<String>,
}

impl<K: TokenKind> GrammarBuilder<K> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            index: HashMap::new(),
            initial: None,
        }
    }

    /// Registers a state with default options.
    pub fn define_state(
        &mut self,
        name: impl Into<String>,
        rules: Vec<Rule<K>>,
        fallback: K,
    ) -> Result<StateId, GrammarError> {
        self.define_state_with(name, rules, fallback, StateOptions::default())
    }

    /// Registers a state. Fails if the name is taken or a pattern is invalid.
    pub fn define_state_with(
        &mut self,
        name: impl Into<String>,
        rules: Vec<Rule<K>>,
        fallback: K,
        options: StateOptions,
    ) -> Result<StateId, GrammarError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(GrammarError::DuplicateState(name));
        }
        let rules = rules
            .into_iter()
            .map(|rule| CompiledRule::compile(&name, rule))
            .collect::<Result<Vec<_>, _>>()?;

        let id = StateId(self.states.len() as u32);
        self.index.insert(name.clone(), id);
        self.states.push(PendingState {
            name,
            rules,
            fallback,
            options,
        });
        Ok(id)
    }

    /// Selects the state lexing starts in. Defaults to the first state defined.
    pub fn initial(&mut self, name: impl Into<String>) -> &mut Self {
        self.initial = Some(name.into());
        self
    }

    /// Resolves all transitions and freezes the grammar.
    pub fn build(self) -> Result<Grammar<K>, GrammarError> {
        if self.states.is_empty() {
            return Err(GrammarError::NoStates(self.name));
        }
        let initial = match &self.initial {
            Some(name) => *self
                .index
                .get(name)
                .ok_or_else(|| GrammarError::UnknownInitialState(name.clone()))?,
            None => StateId(0),
        };

        let mut states = Vec::with_capacity(self.states.len());
        for pending in self.states {
            let rules = pending
                .rules
                .into_iter()
                .map(|rule| rule.resolve(&pending.name, &self.index))
                .collect::<Result<Vec<_>, _>>()?;
            states.push(LexerState {
                name: pending.name,
                rules,
                fallback: pending.fallback,
                options: pending.options,
            });
        }

        tracing::debug!(grammar = %self.name, states = states.len(), "grammar.built");
        Ok(Grammar {
            name: self.name,
            states,
            index: self.index,
            initial,
        })
    }
}

/// An immutable set of lexer states.
///
/// Grammars are built once and shared by reference (typically behind an
/// `Arc`) between any number of lexers and documents.
#[derive(Debug)]
pub struct Grammar<K> {
    name: String,
    states: Vec<LexerState<K>>,
    index: HashMap<String, StateId>,
    initial: StateId,
}

impl<K: TokenKind> Grammar<K> {
    pub fn builder(name: impl Into<String>) -> GrammarBuilder<K> {
        GrammarBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The state `id` names. Panics if `id` comes from another grammar;
    /// see [`owns`](Self::owns).
    pub fn state(&self, id: StateId) -> &LexerState<K> {
        &self.states[id.index()]
    }

    /// Returns true if every state on `stack` belongs to this grammar.
    pub fn owns(&self, stack: &StateStack) -> bool {
        stack
            .frames()
            .iter()
            .all(|id| id.index() < self.states.len())
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.index.get(name).copied()
    }

    pub fn state_name(&self, id: StateId) -> &str {
        self.state(id).name()
    }

    pub fn states(&self) -> impl Iterator<Item = &LexerState<K>> {
        self.states.iter()
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    /// A stack holding only the initial state.
    pub fn initial_stack(&self) -> StateStack {
        StateStack::new(self.initial)
    }

    /// Builds a stack from state names, bottom first.
    pub fn stack_of(&self, names: &[&str]) -> Option<StateStack> {
        let ids = names
            .iter()
            .map(|name| self.state_id(name))
            .collect::<Option<Vec<_>>>()?;
        StateStack::from_ids(ids)
    }

    /// Tries the rules of `state` in declaration order, anchored at `offset`.
    ///
    /// Returns `None` when nothing matches; the caller then emits the
    /// state's fallback kind for one character.
    pub fn match_at(&self, state: StateId, text: &str, offset: usize) -> Option<RuleMatch<K>> {
        let haystack = text.get(offset..)?;
        if haystack.is_empty() {
            return None;
        }
        self.state(state).match_start(haystack)
    }
}
