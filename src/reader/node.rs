//! Node Types
//!
//! The record describing one recognized token.

use crate::core::position::Position;

/// Kind of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// No token: nothing produced yet, end of stream, or a lexical error
    #[default]
    Invalid,
    /// Start tag: <name attrs...> or <name attrs.../>
    Begin,
    /// End tag: </name>
    End,
    /// Text content between tags
    Text,
    /// Comment: <!--...-->
    Comment,
    /// Declaration: <?...?>
    XmlHeader,
}

impl NodeKind {
    /// Short lowercase name: `begin`, `end`, `text`, `comment`, `xml_header`, `invalid`
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Invalid => "invalid",
            NodeKind::Begin => "begin",
            NodeKind::End => "end",
            NodeKind::Text => "text",
            NodeKind::Comment => "comment",
            NodeKind::XmlHeader => "xml_header",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute scanned inside a start tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace prefix (before colon), if any
    pub prefix: Option<String>,
    /// Local name (after colon)
    pub name: String,
    /// Raw value between the quotes; `None` for a bare attribute
    pub value: Option<String>,
}

impl Attribute {
    /// Get the name including its prefix
    pub fn qualified_name(&self) -> String {
        qualify(self.prefix.as_deref(), &self.name)
    }
}

/// One lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Local name for tags, raw content otherwise
    pub text: String,
    /// Namespace prefix of a tag name
    pub prefix: Option<String>,
    /// Only meaningful for `Begin`
    pub self_closing: bool,
    /// 1-based line of the first character
    pub line: usize,
    /// 1-based column of the first character
    pub column_start: usize,
    /// Byte offset of the first character, relative to the window
    pub offset: usize,
    /// Element nesting depth
    pub depth: usize,
    /// Attributes of a `Begin` node
    pub attributes: Vec<Attribute>,
}

impl Default for Node {
    fn default() -> Self {
        Node::invalid_at(Position::START, 0, 0)
    }
}

impl Node {
    /// The sentinel node at the start of the window
    pub fn invalid() -> Self {
        Node::default()
    }

    /// The sentinel node where scanning stopped
    pub fn invalid_at(location: Position, offset: usize, depth: usize) -> Self {
        Node {
            kind: NodeKind::Invalid,
            text: String::new(),
            prefix: None,
            self_closing: false,
            line: location.line,
            column_start: location.column,
            offset,
            depth,
            attributes: Vec::new(),
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.kind == NodeKind::Invalid
    }

    /// Tag name including its prefix
    pub fn qualified_name(&self) -> String {
        qualify(self.prefix.as_deref(), &self.text)
    }

    /// Get an attribute value by local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.value.as_deref())
    }
}

fn qualify(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(p) => format!("{p}:{local}"),
        None => local.to_string(),
    }
}
