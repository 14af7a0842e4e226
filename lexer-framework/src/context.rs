use crate::cursor::Cursor;
use crate::grammar::{Action, Grammar, StateId};
use crate::state::StateStack;
use crate::traits::TokenKind;
use common_framework::Position;

/// Everything the lexer tracks between two tokens: where it is in the
/// input and which states are active.
#[derive(Debug, Clone)]
pub struct LexContext<'input> {
    cursor: Cursor<'input>,
    stack: StateStack,
}

impl<'input> LexContext<'input> {
    pub fn new(cursor: Cursor<'input>, stack: StateStack) -> Self {
        Self { cursor, stack }
    }

    /// Returns a reference to the cursor.
    pub fn cursor(&self) -> &Cursor<'input> {
        &self.cursor
    }

    /// Returns a mutable reference to the cursor.
    pub fn cursor_mut(&mut self) -> &mut Cursor<'input> {
        &mut self.cursor
    }

    pub fn stack(&self) -> &StateStack {
        &self.stack
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// Enters a new state.
    pub fn enter(&mut self, state: StateId) {
        self.stack = self.stack.push(state);
    }

    /// Leaves the current state; the initial state is never left.
    pub fn leave(&mut self) {
        self.stack = self.stack.pop();
    }

    /// Replaces the current state, including the initial one.
    pub fn replace(&mut self, state: StateId) {
        self.stack = self.stack.replace(state);
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Push(state) => self.enter(state),
            Action::Pop => self.leave(),
            Action::Switch(state) => self.replace(state),
        }
    }

    /// Leaves every single-argument state on top of the stack, since the
    /// item it was waiting for is complete.
    pub fn end_argument<K: TokenKind>(&mut self, grammar: &Grammar<K>) {
        while self.stack.depth() > 1 && grammar.state(self.stack.top()).options().single_argument {
            self.leave();
        }
    }
}
