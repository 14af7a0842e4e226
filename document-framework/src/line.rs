use lexer_framework::{Grammar, Lexer, StateStack, Token, TokenKind};
use std::sync::Arc;

/// The tokens of one text line, including its trailing newline.
///
/// Token spans are relative to the line start, so a line that only moves
/// keeps its token allocation.
#[derive(Debug, Clone)]
pub(crate) struct Line<K> {
    pub(crate) start: usize,
    pub(crate) len: usize,
    /// Index of the line's first token in the whole document.
    pub(crate) first_token: usize,
    pub(crate) tokens: Arc<[Token<K>]>,
    /// The state stack after the last token, which is where the next line
    /// starts.
    pub(crate) end_state: StateStack,
}

impl<K: TokenKind> Line<K> {
    /// Lexes the line of `text` that begins at `start` in `state`.
    pub(crate) fn lex(grammar: &Grammar<K>, text: &str, start: usize, state: StateStack) -> Self {
        let end = text[start..]
            .find('\n')
            .map_or(text.len(), |newline| start + newline + 1);
        let mut lexer = Lexer::resume(grammar, &text[start..end], 0, state);
        let tokens: Arc<[Token<K>]> = lexer.by_ref().collect();
        let end_state = lexer.state().clone();
        Self {
            start,
            len: end - start,
            first_token: 0,
            tokens,
            end_state,
        }
    }

    pub(crate) fn end(&self) -> usize {
        self.start + self.len
    }

    /// Returns true if another line follows this one.
    pub(crate) fn has_newline(&self, text: &str) -> bool {
        self.len > 0 && text.as_bytes()[self.end() - 1] == b'\n'
    }
}
