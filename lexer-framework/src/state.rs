use crate::grammar::{Grammar, StateId};
use crate::traits::TokenKind;
use std::fmt;
use std::sync::Arc;

/// The active lexer states at a point in the text, bottom first.
///
/// Stacks are persistent: `push`, `pop` and `replace` return a new stack and
/// leave `self` untouched, so tokens can share the stack they were produced
/// in without copying. Two stacks are equal when they hold the same
/// sequence of states.
#[derive(Clone, Eq, Hash)]
pub struct StateStack {
    frames: Arc<[StateId]>,
}

impl StateStack {
    /// A stack holding a single (initial) state.
    pub fn new(initial: StateId) -> Self {
        Self {
            frames: Arc::from(&[initial][..]),
        }
    }

    /// Builds a stack from states listed bottom first. Returns `None` for an
    /// empty list.
    pub fn from_ids(ids: impl IntoIterator<Item = StateId>) -> Option<Self> {
        let frames: Arc<[StateId]> = ids.into_iter().collect();
        if frames.is_empty() {
            return None;
        }
        Some(Self { frames })
    }

    /// Number of active states, always at least 1.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The state rules are currently taken from.
    pub fn top(&self) -> StateId {
        self.frames[self.frames.len() - 1]
    }

    /// The states, bottom first.
    pub fn frames(&self) -> &[StateId] {
        &self.frames
    }

    pub fn push(&self, state: StateId) -> Self {
        let mut frames = Vec::with_capacity(self.frames.len() + 1);
        frames.extend_from_slice(&self.frames);
        frames.push(state);
        Self {
            frames: frames.into(),
        }
    }

    /// Leaves the top state. The bottom state is never left.
    pub fn pop(&self) -> Self {
        if self.frames.len() == 1 {
            return self.clone();
        }
        self.truncated(self.frames.len() - 1)
    }

    pub fn replace(&self, state: StateId) -> Self {
        let mut frames = self.frames.to_vec();
        let last = frames.len() - 1;
        frames[last] = state;
        Self {
            frames: frames.into(),
        }
    }

    /// The bottom `depth` states (at least one).
    pub fn truncated(&self, depth: usize) -> Self {
        let depth = depth.clamp(1, self.frames.len());
        if depth == self.frames.len() {
            return self.clone();
        }
        Self {
            frames: Arc::from(&self.frames[..depth]),
        }
    }

    /// Returns true if `other` starts with every state of `self`.
    pub fn is_prefix_of(&self, other: &StateStack) -> bool {
        other.frames.starts_with(&self.frames)
    }

    /// Returns true if both stacks share the same allocation.
    pub fn ptr_eq(&self, other: &StateStack) -> bool {
        Arc::ptr_eq(&self.frames, &other.frames)
    }

    /// State names, bottom first.
    pub fn names<'g, K: TokenKind>(&self, grammar: &'g Grammar<K>) -> Vec<&'g str> {
        self.frames
            .iter()
            .map(|id| grammar.state_name(*id))
            .collect()
    }
}

impl PartialEq for StateStack {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.frames == other.frames
    }
}

impl fmt::Debug for StateStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.frames.iter().map(|id| id.index()))
            .finish()
    }
}
