use crate::document::{Document, TokenRef};
use common_framework::{Checkpoint, Position};
use lexer_framework::TokenKind;

/// Walks the tokens of a [`Document`] in either direction from any point.
///
/// The runner sits between two tokens: [`advance`](Self::advance) returns
/// the token after it and moves past it, [`retreat`](Self::retreat) the
/// token before it. Line boundaries are crossed transparently.
#[derive(Debug, Clone)]
pub struct Runner<'d, K> {
    document: &'d Document<K>,
    index: usize,
}

impl<'d, K: TokenKind> Runner<'d, K> {
    /// A runner before the first token.
    pub fn new(document: &'d Document<K>) -> Self {
        Self { document, index: 0 }
    }

    /// A runner before the token containing `offset`, or after the last
    /// token when `offset` is at or past the end.
    pub fn at(document: &'d Document<K>, offset: usize) -> Self {
        let index = document
            .token_at(offset)
            .map_or(document.token_count(), |token| token.index());
        Self { document, index }
    }

    /// A runner before the first token of line `line`.
    pub fn at_line(document: &'d Document<K>, line: usize) -> Self {
        let index = document
            .line_range(line)
            .and_then(|range| document.tokens_in_range(range.start..usize::MAX).next())
            .map_or(document.token_count(), |token| token.index());
        Self { document, index }
    }

    pub fn document(&self) -> &'d Document<K> {
        self.document
    }

    /// Returns the token after the runner without moving.
    pub fn peek(&self) -> Option<TokenRef<'d, K>> {
        self.document.token(self.index)
    }

    /// Returns the token `offset` places after the runner without moving.
    pub fn peek_at(&self, offset: usize) -> Option<TokenRef<'d, K>> {
        self.document.token(self.index + offset)
    }

    /// Moves past the next token and returns it.
    pub fn advance(&mut self) -> Option<TokenRef<'d, K>> {
        let token = self.peek()?;
        self.index += 1;
        Some(token)
    }

    /// Moves before the previous token and returns it.
    pub fn retreat(&mut self) -> Option<TokenRef<'d, K>> {
        let index = self.index.checked_sub(1)?;
        let token = self.document.token(index)?;
        self.index = index;
        Some(token)
    }

    /// Tokens from here to the end, advancing the runner.
    pub fn forward(&mut self) -> impl Iterator<Item = TokenRef<'d, K>> + '_ {
        std::iter::from_fn(move || self.advance())
    }

    /// Tokens from here to the start, in reverse, moving the runner back.
    pub fn backward(&mut self) -> impl Iterator<Item = TokenRef<'d, K>> + '_ {
        std::iter::from_fn(move || self.retreat())
    }

    /// Tokens from here to the end of the current line.
    pub fn forward_line(&mut self) -> impl Iterator<Item = TokenRef<'d, K>> + '_ {
        let line = self.peek().map(|token| token.line());
        std::iter::from_fn(move || {
            let token = self.peek()?;
            if Some(token.line()) != line {
                return None;
            }
            self.advance()
        })
    }

    /// Tokens from here back to the start of the current line, in reverse.
    pub fn backward_line(&mut self) -> impl Iterator<Item = TokenRef<'d, K>> + '_ {
        let line = self
            .index
            .checked_sub(1)
            .and_then(|index| self.document.token(index))
            .map(|token| token.line());
        std::iter::from_fn(move || {
            let index = self.index.checked_sub(1)?;
            let token = self.document.token(index)?;
            if Some(token.line()) != line {
                return None;
            }
            self.retreat()
        })
    }

    /// Sequence number of the token after the runner.
    pub fn token_index(&self) -> usize {
        self.index
    }

    /// Position of the runner in the text.
    pub fn position(&self) -> Position {
        let offset = self
            .peek()
            .map_or(self.document.len(), |token| token.start());
        self.document.position_of(offset)
    }

    pub fn is_eof(&self) -> bool {
        self.index >= self.document.token_count()
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    /// Creates a checkpoint of the current state.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.index, self.position())
    }

    /// Restores the runner to a checkpoint.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.index = checkpoint.index().min(self.document.token_count());
    }
}
