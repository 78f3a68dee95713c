//! Scan position over the expression text
use crate::utils::Position;

/// Read-only view of the remaining input plus the current position.
///
/// Lookahead distances and `advance` counts are in characters. Offsets are
/// bytes, so every position can slice the source directly.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    position: Position,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: Position::start(),
        }
    }

    /// Character `k` places ahead of the current one, `None` past the end
    pub fn peek(&self, k: usize) -> Option<char> {
        self.rest().chars().nth(k)
    }

    /// Consume `n` characters and return the consumed text.
    /// Stops early at end of input.
    pub fn advance(&mut self, n: usize) -> &'a str {
        let consumed = self.ahead(n);
        self.position = self.position.advance_str(consumed);
        consumed
    }

    /// The next `n` characters (fewer at end of input) without consuming them
    pub fn ahead(&self, n: usize) -> &'a str {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .nth(n)
            .map(|(byte, _)| byte)
            .unwrap_or(rest.len());
        &rest[..end]
    }

    /// Position reached after consuming `n` more characters
    pub fn position_after(&self, n: usize) -> Position {
        self.position.advance_str(self.ahead(n))
    }

    /// Unconsumed input
    pub fn rest(&self) -> &'a str {
        &self.source[self.position.offset..]
    }

    /// Absolute byte offset of the next character
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position.offset >= self.source.len()
    }

    pub fn source(&self) -> &'a str {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_never_fails() {
        let cursor = Cursor::new("ab");
        assert_eq!(cursor.peek(0), Some('a'));
        assert_eq!(cursor.peek(1), Some('b'));
        assert_eq!(cursor.peek(2), None);
        assert_eq!(cursor.peek(100), None);
        assert_eq!(Cursor::new("").peek(0), None);
    }

    #[test]
    fn test_advance_tracks_bytes_and_lines() {
        let mut cursor = Cursor::new("é\n'x'");
        assert_eq!(cursor.advance(2), "é\n");
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.position().line, 2);
        assert_eq!(cursor.position().column, 1);
        assert_eq!(cursor.peek(0), Some('\''));
        assert_eq!(cursor.rest(), "'x'");
    }

    #[test]
    fn test_lookahead_does_not_consume() {
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.ahead(2), "ab");
        assert_eq!(cursor.position_after(2).offset, 2);
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.ahead(10), "abc");

        cursor.advance(10);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.source(), "abc");
    }
}
