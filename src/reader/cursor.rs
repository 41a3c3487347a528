//! Cursor - the pull-parser driver
//!
//! A cursor owns one [`BufferSource`], the scan state inside its window and
//! the last node produced. Use [`Cursor::next_step`] to pattern-match on
//! each step, or the flag-based surface ([`Cursor::advance`], [`Cursor::done`],
//! [`Cursor::errored`]) and the convenience helpers built on it.

use std::io::Read;
use std::path::Path;

use tracing::{debug, trace, warn};

use super::node::{Node, NodeKind};
use super::source::BufferSource;
use crate::core::position::Position;
use crate::core::tokenizer::{Checkpoint, CursorOptions, Step, Tokenizer};
use crate::error::{LexError, OpenError, ParseError};

/// Stateful XML pull parser over an in-memory buffer
#[derive(Debug, Default)]
pub struct Cursor {
    options: CursorOptions,
    source: Option<BufferSource>,
    checkpoint: Checkpoint,
    node: Node,
    error: Option<LexError>,
    done: bool,
    errored: bool,
}

impl Cursor {
    /// Create an unopened cursor
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CursorOptions) -> Self {
        Cursor {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> CursorOptions {
        self.options
    }

    /// Load a source, discarding all previous scan state
    pub fn open_source(&mut self, source: BufferSource) {
        debug!(
            source = source.name(),
            bytes = source.full_text().len(),
            window = ?source.window(),
            "opened buffer"
        );
        *self = Cursor {
            options: self.options,
            source: Some(source),
            ..Self::default()
        };
    }

    /// Load an in-memory string
    pub fn try_open_string(
        &mut self,
        name: &str,
        content: impl Into<String>,
    ) -> Result<(), OpenError> {
        self.open_source(BufferSource::new(name, content.into()));
        Ok(())
    }

    /// Load `content[start..start + length]` of an in-memory string
    pub fn try_open_window(
        &mut self,
        name: &str,
        content: impl Into<String>,
        start: usize,
        length: usize,
    ) -> Result<(), OpenError> {
        let source = BufferSource::windowed(name, content.into(), start, length)?;
        self.open_source(source);
        Ok(())
    }

    /// Load a whole file
    pub fn try_open_file(&mut self, path: impl AsRef<Path>) -> Result<(), OpenError> {
        let source = BufferSource::from_file(path)?;
        self.open_source(source);
        Ok(())
    }

    /// Load `[start, start + length)` of a file; `length == 0` reads to the end
    pub fn try_open_file_window(
        &mut self,
        path: impl AsRef<Path>,
        start: usize,
        length: usize,
    ) -> Result<(), OpenError> {
        let source = BufferSource::from_file(path)?.restrict_from(start, length)?;
        self.open_source(source);
        Ok(())
    }

    /// Read everything from `reader` and load it
    pub fn try_open_reader<R: Read>(&mut self, name: &str, reader: R) -> Result<(), OpenError> {
        let source = BufferSource::from_reader(name, reader)?;
        self.open_source(source);
        Ok(())
    }

    /// Load an in-memory string; always succeeds
    pub fn open_string(&mut self, name: &str, content: impl Into<String>) -> bool {
        report(self.try_open_string(name, content))
    }

    /// Load a window of an in-memory string; false on invalid window bounds
    pub fn open_string_window(
        &mut self,
        name: &str,
        content: impl Into<String>,
        start: usize,
        length: usize,
    ) -> bool {
        report(self.try_open_window(name, content, start, length))
    }

    /// Load a file; false if it cannot be read
    pub fn open_file(&mut self, path: impl AsRef<Path>) -> bool {
        report(self.try_open_file(path))
    }

    /// Load a window of a file; false if it cannot be read or the window is invalid
    pub fn open_file_window(
        &mut self,
        path: impl AsRef<Path>,
        start: usize,
        length: usize,
    ) -> bool {
        report(self.try_open_file_window(path, start, length))
    }

    /// Load everything from a reader; false on read failure or undecodable bytes
    pub fn open_reader<R: Read>(&mut self, name: &str, reader: R) -> bool {
        report(self.try_open_reader(name, reader))
    }

    /// Run one tokenizer step from the current offset
    ///
    /// Once the cursor is done every call returns `EndOfStream`.
    pub fn next_step(&mut self) -> Step {
        if self.done {
            return Step::EndOfStream;
        }
        let Some(source) = &self.source else {
            self.finish(Position::START, 0);
            return Step::EndOfStream;
        };

        let mut tokenizer = Tokenizer::resume(source.text(), self.checkpoint, self.options);
        let step = tokenizer.next_step();
        self.checkpoint = tokenizer.checkpoint();

        match &step {
            Step::Token(node) => {
                trace!(kind = %node.kind, line = node.line, column = node.column_start, "node");
                self.node = node.clone();
            }
            Step::EndOfStream => {
                self.finish(self.checkpoint.location(), self.checkpoint.offset());
            }
            Step::Error(err) => {
                debug!(source = source.name(), error = %err, "lexical error");
                self.error = Some(err.clone());
                self.errored = true;
                self.finish(Position::new(err.line, err.column), err.offset);
            }
        }
        step
    }

    /// Mark the cursor done, leaving the sentinel where scanning stopped
    fn finish(&mut self, location: Position, offset: usize) {
        self.done = true;
        self.node = Node::invalid_at(location, offset, self.checkpoint.depth());
    }

    /// Produce the next node; false once input is exhausted or malformed
    pub fn advance(&mut self) -> bool {
        matches!(self.next_step(), Step::Token(_))
    }

    /// The last node produced, or the invalid sentinel
    pub fn current_node(&self) -> &Node {
        &self.node
    }

    pub fn node_kind(&self) -> NodeKind {
        self.node.kind
    }

    pub fn node_text(&self) -> &str {
        &self.node.text
    }

    pub fn node_line(&self) -> usize {
        self.node.line
    }

    pub fn node_column_start(&self) -> usize {
        self.node.column_start
    }

    pub fn node_offset(&self) -> usize {
        self.node.offset
    }

    pub fn node_self_closing(&self) -> bool {
        self.node.self_closing
    }

    /// True once the window is exhausted or an error stopped scanning
    pub fn done(&self) -> bool {
        self.done
    }

    /// True if scanning stopped on malformed markup
    pub fn errored(&self) -> bool {
        self.errored
    }

    /// The lexical error that stopped scanning, if any
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    pub fn source(&self) -> Option<&BufferSource> {
        self.source.as_ref()
    }

    fn parse_error(&self) -> Option<ParseError> {
        let source_name = self
            .source
            .as_ref()
            .map(|s| s.name().to_string())
            .unwrap_or_default();
        self.error
            .clone()
            .map(|error| ParseError { source_name, error })
    }

    /// Advance and return the new current node
    ///
    /// After clean exhaustion this returns the invalid sentinel; after
    /// malformed markup it returns the error.
    pub fn get_node(&mut self) -> Result<Node, ParseError> {
        self.advance();
        match self.parse_error() {
            Some(err) => Err(err),
            None => Ok(self.node.clone()),
        }
    }

    /// Call `f` with each remaining node
    pub fn each<F: FnMut(&Node)>(&mut self, mut f: F) -> Result<(), ParseError> {
        while self.advance() {
            f(&self.node);
        }
        self.parse_error().map_or(Ok(()), Err)
    }

    /// Call `f` after each advance; `f` reads the node through the cursor
    pub fn each_node<F: FnMut(&Cursor)>(&mut self, mut f: F) -> Result<(), ParseError> {
        while self.advance() {
            f(self);
        }
        self.parse_error().map_or(Ok(()), Err)
    }

    /// Iterate the remaining nodes, ending with the error if markup is malformed
    pub fn nodes(&mut self) -> Nodes<'_> {
        Nodes {
            cursor: self,
            finished: false,
        }
    }
}

fn report(result: Result<(), OpenError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "could not open buffer");
            false
        }
    }
}

/// Iterator returned by [`Cursor::nodes`]
pub struct Nodes<'c> {
    cursor: &'c mut Cursor,
    finished: bool,
}

impl Iterator for Nodes<'_> {
    type Item = Result<Node, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.cursor.advance() {
            return Some(Ok(self.cursor.node.clone()));
        }
        self.finished = true;
        self.cursor.parse_error().map(Err)
    }
}
