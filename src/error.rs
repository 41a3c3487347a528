//! Error types
//!
//! Two tiers: [`OpenError`] when a buffer cannot be loaded, and
//! [`LexError`] when markup is malformed. [`ParseError`] is the lexical
//! error as raised by the convenience surface, labelled with the source name.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::encoding::Encoding;
use crate::core::position::Position;

/// A construct that was still open when the window ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Tag,
    EndTag,
    Comment,
    XmlDeclaration,
    AttributeValue,
}

impl std::fmt::Display for Construct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Construct::Tag => "tag",
            Construct::EndTag => "end tag",
            Construct::Comment => "comment",
            Construct::XmlDeclaration => "XML declaration",
            Construct::AttributeValue => "attribute value",
        })
    }
}

/// What went wrong at a lexical error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("invalid name start character {0:?}")]
    InvalidNameStart(char),
    #[error("invalid character {0:?}")]
    InvalidTagChar(char),
    #[error("didn't expect '{0}' to be followed by anything but '>'")]
    ExpectedGreater(char),
    #[error("unsupported markup declaration")]
    UnsupportedDeclaration,
    #[error("unterminated {0}")]
    Unterminated(Construct),
}

/// Malformed markup, located relative to the scanned window
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub column: usize,
    /// Byte offset of the offending character
    pub offset: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, location: Position, offset: usize) -> Self {
        LexError {
            kind,
            line: location.line,
            column: location.column,
            offset,
        }
    }
}

/// A lexical error raised by `get_node` and the iteration helpers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source_name}:{}:{} - {}", .error.line, .error.column, .error.kind)]
pub struct ParseError {
    pub source_name: String,
    pub error: LexError,
}

/// Failure to load a buffer into a cursor
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("could not open file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{name} is not valid {encoding}")]
    Malformed { name: String, encoding: Encoding },
    #[error("window {start}+{length} exceeds buffer of {len} bytes")]
    WindowOutOfRange {
        start: usize,
        length: usize,
        len: usize,
    },
    #[error("window boundary {offset} splits a UTF-8 character")]
    WindowSplitsChar { offset: usize },
}

/// Any failure of an operation that both opens and scans
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Open(#[from] OpenError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
