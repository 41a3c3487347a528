//! XML Tokenizer - State machine for XML token extraction
//!
//! Implements a pull-parser style tokenizer that produces one [`Node`] per step:
//! - Element start tags (including self-closing)
//! - Element end tags
//! - Text content
//! - Comments
//! - Declarations (`<?...?>`)
//!
//! Each step reports an explicit [`Step`] so a clean end of input is never
//! confused with malformed markup.

use super::attributes::{invalid_char, scan_tag_body, unterminated};
use super::names::NameSyntax;
use super::position::Position;
use super::scanner::Scanner;
use crate::error::{Construct, LexError, LexErrorKind};
use crate::reader::node::{Node, NodeKind};

/// Tokenizer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorOptions {
    /// Character grammar for element and attribute names
    pub names: NameSyntax,
    /// Keep attributes on `Begin` nodes
    pub attributes: bool,
}

impl CursorOptions {
    pub fn with_names(mut self, names: NameSyntax) -> Self {
        self.names = names;
        self
    }

    pub fn with_attributes(mut self, attributes: bool) -> Self {
        self.attributes = attributes;
        self
    }
}

impl Default for CursorOptions {
    fn default() -> Self {
        CursorOptions {
            names: NameSyntax::Xml,
            attributes: true,
        }
    }
}

/// Outcome of one tokenizer step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A token was recognized
    Token(Node),
    /// The window is exhausted
    EndOfStream,
    /// Markup was malformed; scanning cannot continue
    Error(LexError),
}

/// Resumable scan state, detached from the input it was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Checkpoint {
    offset: usize,
    location: Position,
    depth: usize,
    finished: bool,
}

impl Checkpoint {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn location(&self) -> Position {
        self.location
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// XML tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    options: CursorOptions,
    depth: usize,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, CursorOptions::default())
    }

    pub fn with_options(input: &'a str, options: CursorOptions) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            options,
            depth: 0,
            finished: false,
        }
    }

    /// Continue from a checkpoint taken over the same input
    pub fn resume(input: &'a str, checkpoint: Checkpoint, options: CursorOptions) -> Self {
        Tokenizer {
            scanner: Scanner::resume(input, checkpoint.offset, checkpoint.location),
            options,
            depth: checkpoint.depth,
            finished: checkpoint.finished,
        }
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.scanner.offset(),
            location: self.scanner.location(),
            depth: self.depth,
            finished: self.finished,
        }
    }

    /// Get the current position in the input
    pub fn position(&self) -> usize {
        self.scanner.offset()
    }

    /// Recognize the next token
    ///
    /// After `EndOfStream` or `Error`, every further step is `EndOfStream`.
    pub fn next_step(&mut self) -> Step {
        if self.finished || self.scanner.is_eof() {
            self.finished = true;
            return Step::EndOfStream;
        }

        let result = match self.scanner.peek() {
            Some(b'<') => self.parse_markup(),
            _ => Ok(self.parse_text()),
        };

        match result {
            Ok(node) => Step::Token(node),
            Err(err) => {
                self.finished = true;
                Step::Error(err)
            }
        }
    }

    /// Start a node at the current scanner position
    fn node(&self, kind: NodeKind) -> Node {
        let location = self.scanner.location();
        Node {
            kind,
            line: location.line,
            column_start: location.column,
            offset: self.scanner.offset(),
            depth: self.depth,
            ..Node::default()
        }
    }

    /// Text runs up to the next '<' or the end of the window
    fn parse_text(&mut self) -> Node {
        let mut node = self.node(NodeKind::Text);
        let end = self
            .scanner
            .find_tag_start()
            .unwrap_or(self.scanner.input().len());
        node.text = self.scanner.consume_to(end).to_string();
        node
    }

    /// Parse markup starting with '<'
    fn parse_markup(&mut self) -> Result<Node, LexError> {
        match self.scanner.peek_at(1) {
            Some(b'?') => self.parse_declaration(),
            Some(b'!') => self.parse_comment(),
            Some(b'/') => self.parse_end_tag(),
            _ => self.parse_start_tag(),
        }
    }

    /// Parse a declaration <?...?>
    fn parse_declaration(&mut self) -> Result<Node, LexError> {
        let mut node = self.node(NodeKind::XmlHeader);
        let end = self.scanner.find_str_after(2, "?>");
        self.scanner.bump(2);

        let content_start = self.scanner.offset();
        if self.scanner.read_ncname(self.options.names).is_none() {
            return Err(self.name_start_error(Construct::XmlDeclaration));
        }
        let end = end.ok_or_else(|| self.unterminated_at(&node, Construct::XmlDeclaration))?;

        self.scanner.consume_to(end);
        node.text = self.scanner.input()[content_start..end].to_string();
        self.scanner.bump(2);
        Ok(node)
    }

    /// Parse a comment <!--...-->
    fn parse_comment(&mut self) -> Result<Node, LexError> {
        let mut node = self.node(NodeKind::Comment);
        if !self.scanner.starts_with("<!--") {
            return Err(LexError::new(
                LexErrorKind::UnsupportedDeclaration,
                self.scanner.location(),
                self.scanner.offset(),
            ));
        }

        let end = self
            .scanner
            .find_str_after(4, "-->")
            .ok_or_else(|| self.unterminated_at(&node, Construct::Comment))?;
        self.scanner.bump(4);
        node.text = self.scanner.consume_to(end).to_string();
        self.scanner.bump(3);
        Ok(node)
    }

    /// Parse an end tag </name>
    fn parse_end_tag(&mut self) -> Result<Node, LexError> {
        let mut node = self.node(NodeKind::End);
        self.scanner.bump(2);

        let (prefix, local) = self.read_tag_name(Construct::EndTag)?;
        node.prefix = prefix;
        node.text = local;

        self.scanner.skip_whitespace();
        match self.scanner.peek() {
            Some(b'>') => self.scanner.bump(1),
            None => return Err(unterminated(&self.scanner, Construct::EndTag)),
            Some(_) => return Err(invalid_char(&self.scanner)),
        }

        self.depth = self.depth.saturating_sub(1);
        node.depth = self.depth;
        Ok(node)
    }

    /// Parse a start tag or empty element tag
    fn parse_start_tag(&mut self) -> Result<Node, LexError> {
        let mut node = self.node(NodeKind::Begin);
        self.scanner.bump(1);

        let (prefix, local) = self.read_tag_name(Construct::Tag)?;
        node.prefix = prefix;
        node.text = local;

        let body = scan_tag_body(&mut self.scanner, self.options.names, self.options.attributes)?;
        node.self_closing = body.self_closing;
        node.attributes = body.attributes;

        if !node.self_closing {
            self.depth += 1;
        }
        Ok(node)
    }

    fn read_tag_name(
        &mut self,
        construct: Construct,
    ) -> Result<(Option<String>, String), LexError> {
        match self.scanner.read_qname(self.options.names) {
            Some(Ok((prefix, local))) => Ok((prefix.map(str::to_string), local.to_string())),
            Some(Err(_)) => Err(invalid_char(&self.scanner)),
            None => Err(self.name_start_error(construct)),
        }
    }

    fn name_start_error(&self, construct: Construct) -> LexError {
        match self.scanner.peek_char() {
            Some(c) => LexError::new(
                LexErrorKind::InvalidNameStart(c),
                self.scanner.location(),
                self.scanner.offset(),
            ),
            None => unterminated(&self.scanner, construct),
        }
    }

    fn unterminated_at(&self, node: &Node, construct: Construct) -> LexError {
        LexError::new(
            LexErrorKind::Unterminated(construct),
            Position::new(node.line, node.column_start),
            node.offset,
        )
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Node, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_step() {
            Step::Token(node) => Some(Ok(node)),
            Step::Error(err) => Some(Err(err)),
            Step::EndOfStream => None,
        }
    }
}

/// Tokenize a whole string, stopping at the first lexical error
pub fn tokenize(input: &str) -> Result<Vec<Node>, LexError> {
    Tokenizer::new(input).collect()
}
