use common_framework::{Checkpoint, Position};

/// A cursor for traversing input text during lexing.
///
/// Offsets are byte offsets and always sit on a char boundary.
#[derive(Debug, Clone)]
pub struct Cursor<'input> {
    input: &'input str,
    current: usize,
    position: Position,
}

impl<'input> Cursor<'input> {
    /// Creates a cursor at the start of `input`.
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            current: 0,
            position: Position::new(),
        }
    }

    /// Creates a cursor at byte `offset`, clamped to the input and moved
    /// back to the nearest char boundary.
    pub fn at(input: &'input str, offset: usize) -> Self {
        let mut offset = offset.min(input.len());
        while !input.is_char_boundary(offset) {
            offset -= 1;
        }
        Self {
            input,
            current: offset,
            position: Position::new().advanced_over(&input[..offset]),
        }
    }

    pub fn input(&self) -> &'input str {
        self.input
    }

    /// Returns the current position in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.current
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.current >= self.input.len()
    }

    /// Returns the next character without advancing the cursor.
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Returns the remaining input from the current position.
    pub fn remaining(&self) -> &'input str {
        &self.input[self.current..]
    }

    /// Advances the cursor by one character.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        let len = ch.len_utf8();
        self.advance_bytes(len);
        Some(ch)
    }

    /// Advances over the next `len` bytes and returns them. `len` is cut
    /// short at the end of input; it must land on a char boundary.
    pub fn advance_bytes(&mut self, len: usize) -> &'input str {
        let end = (self.current + len).min(self.input.len());
        let consumed = &self.input[self.current..end];
        self.position = self.position.advanced_over(consumed);
        self.current = end;
        consumed
    }

    /// Creates a checkpoint that can be restored later.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.current, self.position)
    }

    /// Restores the cursor to a previous checkpoint.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.current = checkpoint.index();
        self.position = checkpoint.position();
    }
}
