use pretty_assertions::assert_eq;
use pullxml::{Cursor, Node, NodeKind};

const CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/catalog.xml");

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn open_fixture(name: &str) -> Vec<Node> {
    let mut cursor = Cursor::new();
    assert!(cursor.open_file(fixture(name)), "could not open {name}");
    cursor.nodes().collect::<Result<_, _>>().unwrap()
}

#[derive(Debug, Default, PartialEq)]
struct Counts {
    begin: usize,
    self_closing: usize,
    end: usize,
    text: usize,
    comment: usize,
    xml_header: usize,
}

impl Counts {
    fn record(&mut self, kind: NodeKind, self_closing: bool) {
        match kind {
            NodeKind::Begin => {
                self.begin += 1;
                if self_closing {
                    self.self_closing += 1;
                }
            }
            NodeKind::End => self.end += 1,
            NodeKind::Text => self.text += 1,
            NodeKind::Comment => self.comment += 1,
            NodeKind::XmlHeader => self.xml_header += 1,
            NodeKind::Invalid => panic!("invalid node yielded during iteration"),
        }
    }
}

fn expected() -> Counts {
    Counts {
        begin: 9,
        self_closing: 2,
        end: 7,
        text: 19,
        comment: 2,
        xml_header: 1,
    }
}

#[test]
fn file_using_each() {
    let mut cursor = Cursor::new();
    assert!(cursor.open_file(CATALOG));

    let mut counts = Counts::default();
    cursor.each(|node| counts.record(node.kind, node.self_closing)).unwrap();

    assert!(cursor.done());
    assert!(!cursor.errored());
    assert_eq!(counts, expected());
}

#[test]
fn file_using_each_node() {
    let mut cursor = Cursor::new();
    assert!(cursor.open_file(CATALOG));

    let mut counts = Counts::default();
    cursor
        .each_node(|c| counts.record(c.node_kind(), c.node_self_closing()))
        .unwrap();

    assert!(cursor.done());
    assert_eq!(counts, expected());
}

#[test]
fn file_using_advance() {
    let mut cursor = Cursor::new();
    assert!(cursor.open_file(CATALOG));

    let mut counts = Counts::default();
    while cursor.advance() {
        counts.record(cursor.node_kind(), cursor.node_self_closing());
    }

    assert!(cursor.done());
    assert!(!cursor.errored());
    assert_eq!(counts, expected());
}

#[test]
fn file_node_details() {
    let mut cursor = Cursor::new();
    assert!(cursor.open_file(CATALOG));
    let nodes: Vec<_> = cursor.nodes().collect::<Result<_, _>>().unwrap();

    let header = &nodes[0];
    assert_eq!(header.kind, NodeKind::XmlHeader);
    assert_eq!(header.text, "xml version=\"1.0\" encoding=\"UTF-8\"");

    let catalog = &nodes[2];
    assert_eq!(
        (catalog.text.as_str(), catalog.line, catalog.column_start),
        ("catalog", 2, 1)
    );
    assert_eq!(catalog.attributes[0].qualified_name(), "xmlns:dc");

    let title = nodes
        .iter()
        .find(|n| n.kind == NodeKind::Begin && n.text == "title")
        .unwrap();
    assert_eq!(title.prefix.as_deref(), Some("dc"));
    assert_eq!((title.line, title.column_start, title.depth), (5, 5, 2));

    let multiline = nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Comment)
        .nth(1)
        .unwrap();
    assert_eq!(multiline.text, " multi\n         line ");
    assert_eq!((multiline.line, multiline.column_start), (12, 5));

    let last_end = nodes.iter().rev().find(|n| n.kind == NodeKind::End).unwrap();
    assert_eq!(
        (last_end.text.as_str(), last_end.line, last_end.column_start, last_end.depth),
        ("catalog", 16, 1, 0)
    );
}

#[test]
fn file_window() {
    let text = std::fs::read_to_string(CATALOG).unwrap();
    let start = text.find("<book id=\"bk102\"").unwrap();
    let end = text.rfind("</book>").unwrap() + "</book>".len();

    let mut cursor = Cursor::new();
    assert!(cursor.open_file_window(CATALOG, start, end - start));

    let first = cursor.get_node().unwrap();
    assert_eq!(
        (first.text.as_str(), first.line, first.column_start, first.offset),
        ("book", 1, 1, 0)
    );
    assert_eq!(first.attribute("lang"), Some("en"));

    let mut last = first;
    while cursor.advance() {
        last = cursor.current_node().clone();
    }
    assert_eq!(
        (last.kind, last.text.as_str(), last.line, last.column_start),
        (NodeKind::End, "book", 7, 3)
    );
    assert!(!cursor.errored());
}

#[test]
fn missing_file() {
    let mut cursor = Cursor::new();
    assert!(!cursor.open_file("./tests/fixtures/missing.xml"));
    assert!(cursor.source().is_none());
}

#[test]
fn broken_markup_raises_from_helpers() {
    let input = "<tag>text<!--test-comment--></t@ag>\n<sct/><gat>\n<inner>\n</inner></gat>";

    let mut cursor = Cursor::new();
    assert!(cursor.open_string("test", input));
    let err = cursor.each_node(|_| {}).unwrap_err();
    assert_eq!(err.to_string(), "test:1:32 - invalid character '@'");
    assert!(cursor.done());
    assert!(cursor.errored());

    let mut cursor = Cursor::new();
    cursor.open_string("test", input);
    assert!(cursor.each(|_| {}).is_err());
}

#[test]
fn clean_end_yields_one_invalid_sentinel() {
    let mut cursor = Cursor::new();
    cursor.open_string("test", "<sct/>");

    let node = cursor.get_node().unwrap();
    assert_eq!(
        (node.kind, node.text.as_str(), node.self_closing),
        (NodeKind::Begin, "sct", true)
    );

    let sentinel = cursor.get_node().unwrap();
    assert_eq!(sentinel.kind, NodeKind::Invalid);
    assert!(cursor.done());
    assert!(!cursor.errored());
}

#[test]
fn file_window_with_zero_length_runs_to_end() {
    let text = std::fs::read_to_string(CATALOG).unwrap();
    let start = text.find("<book id=\"bk102\"").unwrap();

    let mut cursor = Cursor::new();
    assert!(cursor.open_file_window(CATALOG, start, 0));
    assert_eq!(cursor.source().unwrap().window(), start..text.len());

    let nodes: Vec<_> = cursor.nodes().collect::<Result<_, _>>().unwrap();
    assert_eq!(nodes[0].text, "book");
    let last_end = nodes.iter().rev().find(|n| n.kind == NodeKind::End).unwrap();
    assert_eq!((last_end.text.as_str(), last_end.line), ("catalog", 8));
}

#[test]
fn file_with_byte_order_mark() {
    let nodes = open_fixture("bom.xml");
    let header = &nodes[0];
    assert_eq!(header.kind, NodeKind::XmlHeader);
    assert_eq!((header.line, header.column_start, header.offset), (1, 1, 0));
    assert_eq!(nodes[2].text, "a");
}

#[test]
fn file_declared_latin1() {
    let nodes = open_fixture("latin1.xml");
    assert_eq!(nodes[0].text, "xml version=\"1.0\" encoding=\"ISO-8859-1\"");

    let item = nodes.iter().find(|n| n.text == "item").unwrap();
    assert_eq!(item.attribute("price"), Some("2"));
    let content = nodes
        .iter()
        .find(|n| n.kind == NodeKind::Text && n.text.contains("caf"))
        .unwrap();
    assert_eq!(content.text, "café crème");
    assert_eq!((content.line, content.column_start), (3, 19));
}

#[test]
fn file_utf16_both_byte_orders() {
    for name in ["utf16le.xml", "utf16be.xml"] {
        let nodes = open_fixture(name);
        assert_eq!(nodes[0].kind, NodeKind::XmlHeader, "{name}");

        let greeting = &nodes[2];
        assert_eq!((greeting.text.as_str(), greeting.line), ("greeting", 2), "{name}");
        assert_eq!(greeting.attribute("lang"), Some("de"), "{name}");
        assert_eq!((nodes[3].text.as_str(), nodes[3].column_start), ("Grüße", 21), "{name}");
    }
}

#[test]
fn undeclared_latin1_bytes_are_rejected() {
    let mut cursor = Cursor::new();
    let bytes = std::io::Cursor::new(b"<a>caf\xE9</a>".to_vec());
    assert!(!cursor.open_reader("raw", bytes));
    assert!(cursor.source().is_none());
}
