use crate::state::StateStack;
use common_framework::Span;

/// A classified, positioned span of text produced by the lexer.
///
/// `state` is the stack that was active when the token was matched, which
/// is also where lexing must restart to reproduce the token. `scope` is the
/// stack of the block the token belongs to: for a token that enters a state
/// it is the stack after the transition, otherwise the stack before it. An
/// opening delimiter and its closing counterpart therefore share a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K> {
    pub kind: K,
    pub span: Span,
    pub state: StateStack,
    pub scope: StateStack,
}

impl<K: Copy> Token<K> {
    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Nesting depth of the block this token belongs to.
    pub fn depth(&self) -> usize {
        self.scope.depth()
    }

    /// Returns true if this token entered a new state.
    pub fn opens_scope(&self) -> bool {
        self.scope.depth() > self.state.depth()
    }

    /// The token's text, given the source it was lexed from.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.range()]
    }

    /// A copy of the token moved `base` bytes to the right.
    pub fn offset_by(&self, base: usize) -> Self {
        Self {
            kind: self.kind,
            span: self.span.offset_by(base),
            state: self.state.clone(),
            scope: self.scope.clone(),
        }
    }
}
