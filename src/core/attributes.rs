//! XML Attribute Scanning
//!
//! Scans the body of a start tag, after the element name, up to and
//! including the closing `>` or `/>`.

use super::names::NameSyntax;
use super::scanner::Scanner;
use crate::error::{Construct, LexError, LexErrorKind};
use crate::reader::node::Attribute;

/// Result of scanning a start tag body
#[derive(Debug, Default)]
pub struct TagBody {
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

/// Scan attributes and the tag terminator
///
/// When `keep` is false attributes are validated but not collected.
pub fn scan_tag_body(
    scanner: &mut Scanner<'_>,
    names: NameSyntax,
    keep: bool,
) -> Result<TagBody, LexError> {
    let mut body = TagBody::default();

    loop {
        scanner.skip_whitespace();

        match scanner.peek() {
            None => return Err(unterminated(scanner, Construct::Tag)),
            Some(b'>') => {
                scanner.bump(1);
                return Ok(body);
            }
            Some(b'/') => {
                if scanner.peek_at(1) == Some(b'>') {
                    scanner.bump(2);
                    body.self_closing = true;
                    return Ok(body);
                }
                return Err(error_here(scanner, LexErrorKind::ExpectedGreater('/')));
            }
            Some(_) => {}
        }

        let (prefix, name) = match scanner.read_qname(names) {
            Some(Ok(parts)) => parts,
            Some(Err(_)) | None => return Err(invalid_char(scanner)),
        };

        scanner.skip_whitespace();
        let value = if scanner.peek() == Some(b'=') {
            scanner.bump(1);
            scanner.skip_whitespace();
            Some(scan_value(scanner)?)
        } else {
            None
        };

        if keep {
            body.attributes.push(Attribute {
                prefix: prefix.map(str::to_string),
                name: name.to_string(),
                value: value.map(str::to_string),
            });
        }
    }
}

/// Scan a quoted value, returning the text between the quotes
fn scan_value<'a>(scanner: &mut Scanner<'a>) -> Result<&'a str, LexError> {
    let quote = match scanner.peek() {
        Some(q @ (b'"' | b'\'')) => q,
        None => return Err(unterminated(scanner, Construct::Tag)),
        Some(_) => return Err(invalid_char(scanner)),
    };

    let open = (scanner.location(), scanner.offset());
    scanner.bump(1);
    let close = match scanner.find_byte(quote) {
        Some(close) => close,
        None => {
            return Err(LexError::new(
                LexErrorKind::Unterminated(Construct::AttributeValue),
                open.0,
                open.1,
            ))
        }
    };
    let value = scanner.consume_to(close);
    scanner.bump(1);
    Ok(value)
}

fn error_here(scanner: &Scanner<'_>, kind: LexErrorKind) -> LexError {
    LexError::new(kind, scanner.location(), scanner.offset())
}

/// Error for the character under the scanner
pub(crate) fn invalid_char(scanner: &Scanner<'_>) -> LexError {
    match scanner.peek_char() {
        Some(c) => error_here(scanner, LexErrorKind::InvalidTagChar(c)),
        None => unterminated(scanner, Construct::Tag),
    }
}

pub(crate) fn unterminated(scanner: &Scanner<'_>, construct: Construct) -> LexError {
    error_here(scanner, LexErrorKind::Unterminated(construct))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::position::Position;

    fn scan(input: &str) -> Result<TagBody, LexError> {
        let mut scanner = Scanner::new(input);
        scan_tag_body(&mut scanner, NameSyntax::Xml, true)
    }

    #[test]
    fn test_plain_close() {
        let body = scan(">").unwrap();
        assert!(body.attributes.is_empty());
        assert!(!body.self_closing);
    }

    #[test]
    fn test_self_closing_with_whitespace() {
        let body = scan("  />").unwrap();
        assert!(body.self_closing);
    }

    #[test]
    fn test_attributes() {
        let body = scan(" id=\"main\" class = 'a b' xml:lang=\"en\" hidden>").unwrap();
        let names: Vec<_> = body
            .attributes
            .iter()
            .map(|a| a.qualified_name())
            .collect();
        assert_eq!(names, ["id", "class", "xml:lang", "hidden"]);
        assert_eq!(body.attributes[0].value.as_deref(), Some("main"));
        assert_eq!(body.attributes[1].value.as_deref(), Some("a b"));
        assert_eq!(body.attributes[2].prefix.as_deref(), Some("xml"));
        assert_eq!(body.attributes[3].value, None);
    }

    #[test]
    fn test_quoted_gt_is_not_tag_end() {
        let body = scan(" a=\">x\"/>").unwrap();
        assert_eq!(body.attributes[0].value.as_deref(), Some(">x"));
        assert!(body.self_closing);
    }

    #[test]
    fn test_multiline_value_tracks_position() {
        let mut scanner = Scanner::new(" a=\"1\n2\">");
        scan_tag_body(&mut scanner, NameSyntax::Xml, true).unwrap();
        assert_eq!(scanner.location(), Position::new(2, 4));
    }

    #[test]
    fn test_drop_attributes() {
        let mut scanner = Scanner::new(" a=\"1\">");
        let body = scan_tag_body(&mut scanner, NameSyntax::Xml, false).unwrap();
        assert!(body.attributes.is_empty());
    }

    #[test]
    fn test_invalid_character() {
        let err = scan("@ag>").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidTagChar('@'));
        assert_eq!((err.line, err.column, err.offset), (1, 1, 0));
    }

    #[test]
    fn test_slash_without_gt() {
        let err = scan(" / >").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::ExpectedGreater('/'));
    }

    #[test]
    fn test_unterminated_value() {
        let err = scan(" a=\"oops>").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::Unterminated(Construct::AttributeValue));
        assert_eq!(err.column, 4);
    }

    #[test]
    fn test_unquoted_value() {
        let err = scan(" a=1>").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidTagChar('1'));
    }

    #[test]
    fn test_end_of_input() {
        let err = scan(" a=\"1\"").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::Unterminated(Construct::Tag));
    }
}
