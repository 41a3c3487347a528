//! PullXML - streaming pull-style XML tokenizer
//!
//! A [`Cursor`] scans an in-memory buffer (optionally restricted to a window)
//! and yields one [`Node`] per step: start tag, end tag, text run, comment or
//! declaration. No tree is built and nothing is resolved; the caller gets the
//! lexical structure, raw text and positions.
//!
//! Surfaces:
//! - [`Cursor::next_step`]: explicit [`Step`] per call
//! - [`Cursor::advance`] with [`Cursor::done`] / [`Cursor::errored`]: flag-based
//! - [`Cursor::get_node`], [`Cursor::each`], [`Cursor::each_node`], [`Cursor::nodes`]:
//!   convenience helpers that turn malformed markup into a [`ParseError`]
//! - [`Tokenizer`]: borrowing iterator over a `&str`
//! - [`strategy::scan_windows`]: parallel scanning of independent windows
//!
//! With the `nif` feature the cursor is also exported to Elixir.

pub mod core;
pub mod error;
pub mod reader;
pub mod strategy;

#[cfg(feature = "nif")]
mod nif;
#[cfg(feature = "nif")]
mod resource;
#[cfg(feature = "nif")]
mod term;

pub use crate::core::encoding::Encoding;
pub use crate::core::names::NameSyntax;
pub use crate::core::position::Position;
pub use crate::core::tokenizer::{Checkpoint, CursorOptions, Step, Tokenizer};
pub use crate::error::{Construct, Error, LexError, LexErrorKind, OpenError, ParseError};
pub use crate::reader::cursor::{Cursor, Nodes};
pub use crate::reader::node::{Attribute, Node, NodeKind};
pub use crate::reader::source::BufferSource;

/// Tokenize a whole string
///
/// Returns every node, or the first lexical error labelled with `name`.
pub fn tokenize(name: &str, input: &str) -> Result<Vec<Node>, ParseError> {
    crate::core::tokenizer::tokenize(input).map_err(|error| ParseError {
        source_name: name.to_string(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_labels_errors() {
        let err = tokenize("inline", "<a><1/>").unwrap_err();
        assert_eq!(err.source_name, "inline");
        assert_eq!(err.error.kind, LexErrorKind::InvalidNameStart('1'));
    }

    #[test]
    fn test_tokenize_ok() {
        let nodes = tokenize("inline", "<?xml version=\"1.0\"?><a/>").unwrap();
        let kinds: Vec<_> = nodes.iter().map(|n| n.kind).collect();
        assert_eq!(kinds, [NodeKind::XmlHeader, NodeKind::Begin]);
    }
}
