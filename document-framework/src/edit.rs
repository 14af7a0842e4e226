use std::ops::Range;
use thiserror::Error;

/// A single text replacement: `removed` bytes at `start` give way to
/// `inserted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub start: usize,
    pub removed: usize,
    pub inserted: String,
}

impl Edit {
    pub fn new(start: usize, removed: usize, inserted: impl Into<String>) -> Self {
        Self {
            start,
            removed,
            inserted: inserted.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::new(at, 0, text)
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::new(range.start, range.len(), String::new())
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self::new(range.start, range.len(), text)
    }

    /// The replaced range in the text before the edit.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start.saturating_add(self.removed)
    }
}

/// Errors for edits that do not describe a valid change of the text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("edit range {start}..{end} is out of bounds for a text of {len} bytes")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    #[error("edits at {first:?} and {second:?} overlap")]
    Overlapping {
        first: Range<usize>,
        second: Range<usize>,
    },
}

/// Which side of an edit an offset inside the replaced range moves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bias {
    /// Stay at the start of the edit.
    #[default]
    Left,
    /// Move past the inserted text.
    Right,
}

/// What an applied edit changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSummary {
    pub start: usize,
    pub removed: usize,
    pub inserted: usize,
    /// Bytes that were re-lexed, in the edited text.
    pub relexed: Range<usize>,
    /// Lines that were re-lexed, in the edited text.
    pub relexed_lines: Range<usize>,
    /// Token indices that were produced anew, in the edited text.
    pub tokens: Range<usize>,
    /// True when the tokens after the re-lexed region were carried over
    /// from before the edit.
    pub resynced: bool,
    /// True when the resync lookahead ran out and the rest of the text was
    /// re-lexed without comparing states.
    pub lookahead_exhausted: bool,
    /// Token indices regrouped into the tree, in the edited text. The rest
    /// of the tree was kept and moved.
    pub regrouped: Range<usize>,
}

impl EditSummary {
    /// Change in text length.
    pub fn delta(&self) -> isize {
        self.inserted as isize - self.removed as isize
    }

    /// Maps an offset in the text before the edit to the text after it.
    ///
    /// Offsets up to the start of a replaced range are unchanged and offsets
    /// from its end onward move by [`delta`](Self::delta). An offset strictly
    /// inside the replaced range, or at a pure insertion point, goes to the
    /// edge named by `bias`.
    pub fn map_offset(&self, offset: usize, bias: Bias) -> usize {
        let end = self.start + self.removed;
        let replaced = self.removed > 0;
        if offset < self.start || (replaced && offset == self.start) {
            offset
        } else if offset > end || (replaced && offset == end) {
            offset.wrapping_add_signed(self.delta())
        } else {
            match bias {
                Bias::Left => self.start,
                Bias::Right => self.start + self.inserted,
            }
        }
    }
}
