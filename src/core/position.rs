//! Line/column tracking
//!
//! Both line and column are 1-based and relative to the scanned window.
//! Columns count characters, not bytes.

use memchr::{memchr_iter, memrchr};

/// A location in the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Line 1, column 1
    pub const START: Position = Position { line: 1, column: 1 };

    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }

    /// Advance over a single character
    #[inline]
    pub fn advance_char(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    /// Advance over a run of ASCII bytes known to contain no newline
    #[inline]
    pub fn advance_columns(&mut self, n: usize) {
        self.column += n;
    }

    /// Advance over an arbitrary span of text
    pub fn advance_str(&mut self, text: &str) {
        let bytes = text.as_bytes();
        match memrchr(b'\n', bytes) {
            Some(last) => {
                self.line += memchr_iter(b'\n', bytes).count();
                self.column = 1 + text[last + 1..].chars().count();
            }
            None => self.column += text.chars().count(),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
