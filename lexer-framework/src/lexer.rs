use crate::context::LexContext;
use crate::cursor::Cursor;
use crate::grammar::Grammar;
use crate::state::StateStack;
use crate::token::Token;
use crate::traits::TokenKind;
use common_framework::{Position, Span};

/// Stop condition that never fires.
pub type NeverStop = fn(usize, &StateStack) -> bool;

fn never_stop(_offset: usize, _stack: &StateStack) -> bool {
    false
}

/// Drives a [`Grammar`] over a text, one token at a time.
///
/// The lexer is an iterator and can be started from any offset with any
/// state stack, which is what incremental re-lexing relies on. It always
/// makes progress: every token covers at least one character, and input no
/// rule matches becomes a one-character token of the state's fallback kind.
pub struct Lexer<'g, 'input, K, S = NeverStop>
where
    K: TokenKind,
{
    grammar: &'g Grammar<K>,
    context: LexContext<'input>,
    stop: S,
    stopped: bool,
}

impl<'g, 'input, K: TokenKind> Lexer<'g, 'input, K> {
    /// Lexes `input` from its start in the grammar's initial state.
    pub fn new(grammar: &'g Grammar<K>, input: &'input str) -> Self {
        Self::resume(grammar, input, 0, grammar.initial_stack())
    }

    /// Lexes `input` from byte `offset`, with `stack` as the active states.
    ///
    /// `stack` must come from `grammar`. A stack naming states the grammar
    /// does not have is replaced by the initial stack.
    pub fn resume(
        grammar: &'g Grammar<K>,
        input: &'input str,
        offset: usize,
        stack: StateStack,
    ) -> Self {
        let stack = if grammar.owns(&stack) {
            stack
        } else {
            tracing::warn!(
                grammar = grammar.name(),
                ?stack,
                "lexer.foreign_stack"
            );
            grammar.initial_stack()
        };
        Self {
            grammar,
            context: LexContext::new(Cursor::at(input, offset), stack),
            stop: never_stop,
            stopped: false,
        }
    }
}

impl<'g, 'input, K, S> Lexer<'g, 'input, K, S>
where
    K: TokenKind,
    S: FnMut(usize, &StateStack) -> bool,
{
    /// Installs a stop condition, checked at every token boundary before
    /// the next token is produced.
    pub fn stop_when<F>(self, stop: F) -> Lexer<'g, 'input, K, F>
    where
        F: FnMut(usize, &StateStack) -> bool,
    {
        Lexer {
            grammar: self.grammar,
            context: self.context,
            stop,
            stopped: self.stopped,
        }
    }

    pub fn grammar(&self) -> &'g Grammar<K> {
        self.grammar
    }

    /// The state stack at the current offset.
    pub fn state(&self) -> &StateStack {
        self.context.stack()
    }

    pub fn offset(&self) -> usize {
        self.context.offset()
    }

    pub fn position(&self) -> Position {
        self.context.position()
    }

    /// Returns true once the stop condition fired.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Produces the next token, or `None` at end of input or once the stop
    /// condition fired.
    pub fn next_token(&mut self) -> Option<Token<K>> {
        if self.stopped || self.context.is_eof() {
            return None;
        }
        let offset = self.context.offset();
        if (self.stop)(offset, self.context.stack()) {
            self.stopped = true;
            return None;
        }

        loop {
            let top = self.context.stack().top();
            let input = self.context.cursor().input();

            if let Some(found) = self.grammar.match_at(top, input, offset) {
                let before = self.context.stack().clone();
                if let Some(action) = found.action {
                    self.context.apply(action);
                }
                if found.ends_argument {
                    self.context.end_argument(self.grammar);
                }
                let after = self.context.stack();
                let scope = if after.depth() > before.depth() {
                    after.clone()
                } else {
                    before.clone()
                };
                self.context.cursor_mut().advance_bytes(found.len);
                return Some(Token {
                    kind: found.kind,
                    span: Span::new(offset, offset + found.len),
                    state: before,
                    scope,
                });
            }

            let state = self.grammar.state(top);
            if state.options().fallthrough && self.context.stack().depth() > 1 {
                tracing::trace!(state = state.name(), offset, "lexer.fallthrough");
                self.context.leave();
                continue;
            }

            let ch = self.context.cursor_mut().advance()?;
            tracing::trace!(state = state.name(), offset, ?ch, "lexer.fallback");
            let stack = self.context.stack().clone();
            return Some(Token {
                kind: state.fallback(),
                span: Span::new(offset, offset + ch.len_utf8()),
                state: stack.clone(),
                scope: stack,
            });
        }
    }

    /// Collects all remaining tokens.
    pub fn tokenize(&mut self) -> Vec<Token<K>> {
        self.collect()
    }
}

impl<'g, 'input, K, S> Iterator for Lexer<'g, 'input, K, S>
where
    K: TokenKind,
    S: FnMut(usize, &StateStack) -> bool,
{
    type Item = Token<K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every token covers at least one byte.
        let remaining = self.context.cursor().remaining().len();
        (0, Some(remaining))
    }
}

/// Lexes `text` from `start` with `initial` as the active state stack.
pub fn tokenize<'g, 'input, K: TokenKind>(
    grammar: &'g Grammar<K>,
    text: &'input str,
    start: usize,
    initial: StateStack,
) -> Lexer<'g, 'input, K> {
    Lexer::resume(grammar, text, start, initial)
}
