use crate::Position;

/// A saved location for backtracking.
///
/// The lexer cursor stores a byte offset in `index`; the document runner
/// stores a token index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    index: usize,
    position: Position,
}

impl Checkpoint {
    /// Creates a new checkpoint with the given index and position.
    pub fn new(index: usize, position: Position) -> Self {
        Self { index, position }
    }

    /// Returns the index stored in this checkpoint.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the position stored in this checkpoint.
    pub fn position(&self) -> Position {
        self.position
    }
}
