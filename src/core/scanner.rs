//! SIMD-accelerated XML scanning using memchr
//!
//! The scanner owns the byte offset into one window of text and the
//! line/column of that offset. Every method that moves the offset also
//! moves the position, so the two never drift apart.

use memchr::{memchr, memmem};

use super::names::NameSyntax;
use super::position::Position;

/// Scanner for XML delimiter detection
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    location: Position,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner at the start of the given input
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Scanner {
            input,
            pos: 0,
            location: Position::START,
        }
    }

    /// Continue scanning from a previously recorded offset and location
    #[inline]
    pub fn resume(input: &'a str, pos: usize, location: Position) -> Self {
        Scanner {
            input,
            pos: pos.min(input.len()),
            location,
        }
    }

    /// Get the whole input
    #[inline]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Get the current byte offset
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Get the line/column of the current offset
    #[inline]
    pub fn location(&self) -> Position {
        self.location
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get remaining text
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    /// Peek at the current character
    #[inline]
    pub fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &str) -> bool {
        self.remaining().starts_with(needle)
    }

    /// Advance over `n` ASCII bytes that contain no newline (delimiters)
    #[inline]
    pub fn bump(&mut self, n: usize) {
        debug_assert!(self.input.as_bytes()[self.pos..self.pos + n]
            .iter()
            .all(|&b| b.is_ascii() && b != b'\n'));
        self.pos += n;
        self.location.advance_columns(n);
    }

    /// Consume everything up to `end`, returning the consumed text
    pub fn consume_to(&mut self, end: usize) -> &'a str {
        let text = &self.input[self.pos..end];
        self.location.advance_str(text);
        self.pos = end;
        text
    }

    /// Skip whitespace characters (space, tab, newline, carriage return)
    pub fn skip_whitespace(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\n' => self.location.advance_char('\n'),
                b' ' | b'\t' | b'\r' => self.location.advance_columns(1),
                _ => break,
            }
            self.pos += 1;
        }
    }

    /// Find next '<' (tag start) using SIMD
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', self.remaining().as_bytes()).map(|i| self.pos + i)
    }

    /// Find next occurrence of a specific byte
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, self.remaining().as_bytes()).map(|i| self.pos + i)
    }

    /// Find the next occurrence of a delimiter string, starting `skip` bytes ahead
    #[inline]
    pub fn find_str_after(&self, skip: usize, needle: &str) -> Option<usize> {
        let from = (self.pos + skip).min(self.input.len());
        memmem::find(&self.input.as_bytes()[from..], needle.as_bytes())
            .map(|i| from + i)
    }

    /// Read a name (no colon) at the current position
    ///
    /// Returns `None` without moving if the current character cannot start a name.
    pub fn read_ncname(&mut self, syntax: NameSyntax) -> Option<&'a str> {
        let start = self.pos;
        let mut chars = self.remaining().char_indices();
        match chars.next() {
            Some((_, c)) if syntax.is_start(c) => {}
            _ => return None,
        }
        let len = chars
            .find(|&(_, c)| !syntax.is_continue(c))
            .map(|(i, _)| i)
            .unwrap_or(self.input.len() - start);
        Some(self.consume_to(start + len))
    }

    /// Read a possibly prefixed name: `NCName (':' NCName)?`
    ///
    /// Returns `(prefix, local)`. `Err(offset)` points at the character after a colon
    /// that cannot start the local part.
    pub fn read_qname(
        &mut self,
        syntax: NameSyntax,
    ) -> Option<Result<(Option<&'a str>, &'a str), usize>> {
        let first = self.read_ncname(syntax)?;
        if self.peek() != Some(b':') {
            return Some(Ok((None, first)));
        }
        self.bump(1);
        match self.read_ncname(syntax) {
            Some(local) => Some(Ok((Some(first), local))),
            None => Some(Err(self.pos)),
        }
    }
}
