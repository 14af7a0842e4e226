/// A human-readable location in a text buffer.
///
/// Lines and columns count from 1; the column counts `char`s, not bytes.
/// `offset` is the byte offset from the start of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in chars)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Returns the position reached after walking over `text`.
    pub fn advanced_over(mut self, text: &str) -> Self {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += text.len();
        self
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_new() {
        let pos = Position::new();
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 0);
    }

    #[test]
    fn test_position_default() {
        assert_eq!(Position::default(), Position::new());
    }

    #[test]
    fn test_advanced_over_newlines() {
        let pos = Position::new().advanced_over("ab\ncd");
        assert_eq!(pos, Position::at(2, 3, 5));
    }

    #[test]
    fn test_advanced_over_counts_chars_not_bytes() {
        let pos = Position::new().advanced_over("é");
        assert_eq!(pos.column, 2);
        assert_eq!(pos.offset, 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::at(3, 7, 40).to_string(), "3:7");
    }
}
