use std::ops::Range;

/// A half-open byte range `[start, end)` into a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `offset` lies inside the span.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Returns true if the span shares at least one byte with `range`,
    /// or if `range` is empty and sits strictly inside the span.
    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        if range.is_empty() {
            return self.start < range.start && range.start < self.end;
        }
        self.start < range.end && range.start < self.end
    }

    /// Moves the span by `base` bytes.
    pub fn offset_by(&self, base: usize) -> Self {
        Self::new(self.start + base, self.end + base)
    }

    /// Moves the span by a signed amount. The caller guarantees the result
    /// stays non-negative.
    pub fn shifted(&self, delta: isize) -> Self {
        Self::new(
            self.start.wrapping_add_signed(delta),
            self.end.wrapping_add_signed(delta),
        )
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
