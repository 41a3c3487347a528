//! Encoding Detection and Decoding
//!
//! Raw file and reader bytes are turned into UTF-8 text before scanning.
//! UTF-16 is recognized from its BOM or from a `<` paired with a NUL byte.
//! Latin-1 is used when the XML declaration names it. Everything else is
//! UTF-8, with a leading BOM kept out of the scanned window.

use memchr::memmem;

/// Character encoding of raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Latin1,
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Labels treated as ISO-8859-1, compared case-insensitively
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "latin1",
    "latin-1",
    "l1",
];

/// Only this many leading bytes are searched for the declared encoding
const DECLARATION_LIMIT: usize = 256;

impl Encoding {
    /// Detect from a byte order mark, a UTF-16 byte pattern or the declaration
    pub fn detect(input: &[u8]) -> Self {
        match input {
            [0xFF, 0xFE, ..] | [b'<', 0x00, ..] => Encoding::Utf16Le,
            [0xFE, 0xFF, ..] | [0x00, b'<', ..] => Encoding::Utf16Be,
            _ if input.starts_with(UTF8_BOM) => Encoding::Utf8,
            _ => match declared_encoding(input) {
                Some(label) if is_latin1_label(label) => Encoding::Latin1,
                _ => Encoding::Utf8,
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf16Be => "UTF-16BE",
            Encoding::Latin1 => "ISO-8859-1",
        }
    }

    /// Decode `input` into UTF-8 text; `None` if it is malformed in this encoding
    pub fn decode(self, input: Vec<u8>) -> Option<Decoded> {
        match self {
            Encoding::Utf8 => {
                let body = if input.starts_with(UTF8_BOM) {
                    UTF8_BOM.len()
                } else {
                    0
                };
                String::from_utf8(input).ok().map(|text| Decoded { text, body })
            }
            Encoding::Utf16Le => decode_utf16(&input, [0xFF, 0xFE], u16::from_le_bytes),
            Encoding::Utf16Be => decode_utf16(&input, [0xFE, 0xFF], u16::from_be_bytes),
            Encoding::Latin1 => Some(Decoded {
                text: input.iter().map(|&b| char::from(b)).collect(),
                body: 0,
            }),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Decoded text plus the byte length of a UTF-8 BOM kept at its start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Offset where content begins
    pub body: usize,
}

fn decode_utf16(input: &[u8], bom: [u8; 2], unit: fn([u8; 2]) -> u16) -> Option<Decoded> {
    let bytes = input.strip_prefix(&bom[..]).unwrap_or(input);
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok().map(|text| Decoded { text, body: 0 })
}

/// The `encoding` pseudo-attribute of a leading `<?xml ...?>`
fn declared_encoding(input: &[u8]) -> Option<&str> {
    let head = &input[..input.len().min(DECLARATION_LIMIT)];
    if !head.starts_with(b"<?xml") {
        return None;
    }
    let decl = &head[..memmem::find(head, b"?>")?];
    let after = &decl[memmem::find(decl, b"encoding")? + b"encoding".len()..];
    let after = after.trim_ascii_start().strip_prefix(b"=")?.trim_ascii_start();
    let (&quote, rest) = after.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let end = memchr::memchr(quote, rest)?;
    std::str::from_utf8(&rest[..end]).ok()
}

fn is_latin1_label(label: &str) -> bool {
    LATIN1_LABELS.iter().any(|l| l.eq_ignore_ascii_case(label))
}
