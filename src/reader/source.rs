//! Buffer Source
//!
//! Holds the full input text, a label for diagnostics, and the window of
//! that text a cursor scans. Input is always loaded eagerly. Bytes from files
//! and readers are decoded to UTF-8 first, so their windows are offsets into
//! the decoded text.

use std::io::Read;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::core::encoding::Encoding;
use crate::error::OpenError;

/// Text loaded into a cursor
#[derive(Debug, Clone)]
pub struct BufferSource {
    name: String,
    text: Arc<str>,
    /// Start of content after a UTF-8 byte order mark
    body: usize,
    window: Range<usize>,
}

impl BufferSource {
    /// Wrap a whole buffer
    pub fn new(name: impl Into<String>, text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let window = 0..text.len();
        BufferSource {
            name: name.into(),
            text,
            body: 0,
            window,
        }
    }

    /// Wrap a buffer restricted to `[start, start + length)`
    pub fn windowed(
        name: impl Into<String>,
        text: impl Into<Arc<str>>,
        start: usize,
        length: usize,
    ) -> Result<Self, OpenError> {
        let mut source = Self::new(name, text);
        source.window = checked_window(&source.text, start, length)?;
        Ok(source)
    }

    /// Load a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OpenError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| OpenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(path.display().to_string(), bytes)
    }

    /// Read an entire source implementing `Read`
    pub fn from_reader<R: Read>(
        name: impl Into<String>,
        mut reader: R,
    ) -> Result<Self, OpenError> {
        let name = name.into();
        let mut buffer = Vec::new();
        if let Err(source) = reader.read_to_end(&mut buffer) {
            return Err(OpenError::Read { name, source });
        }
        Self::decode(name, buffer)
    }

    /// Decode raw bytes; the window starts after a UTF-8 byte order mark
    pub fn decode(name: String, bytes: Vec<u8>) -> Result<Self, OpenError> {
        let encoding = Encoding::detect(&bytes);
        let Some(decoded) = encoding.decode(bytes) else {
            return Err(OpenError::Malformed { name, encoding });
        };
        if encoding != Encoding::Utf8 {
            debug!(source = %name, %encoding, "transcoded to UTF-8");
        }
        let mut source = Self::new(name, decoded.text);
        source.body = decoded.body;
        source.window.start = decoded.body;
        Ok(source)
    }

    /// Restrict this source to a window of its full text
    ///
    /// A window reaching into the byte order mark starts after it.
    pub fn restrict(mut self, start: usize, length: usize) -> Result<Self, OpenError> {
        let skip = self.body.saturating_sub(start);
        self.window = checked_window(&self.text, start + skip, length.saturating_sub(skip))?;
        Ok(self)
    }

    /// Like [`restrict`](Self::restrict), with `length == 0` meaning "to the end"
    pub fn restrict_from(self, start: usize, length: usize) -> Result<Self, OpenError> {
        let length = match length {
            0 => self.text.len().saturating_sub(start),
            n => n,
        };
        self.restrict(start, length)
    }

    /// Label used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full underlying text
    pub fn full_text(&self) -> &Arc<str> {
        &self.text
    }

    /// Byte range of the window within the full text
    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    /// The text a cursor scans
    pub fn text(&self) -> &str {
        &self.text[self.window.clone()]
    }
}

/// Validate a window against the text it restricts
fn checked_window(text: &str, start: usize, length: usize) -> Result<Range<usize>, OpenError> {
    let end = start
        .checked_add(length)
        .filter(|&end| end <= text.len())
        .ok_or(OpenError::WindowOutOfRange {
            start,
            length,
            len: text.len(),
        })?;

    for offset in [start, end] {
        if !text.is_char_boundary(offset) {
            return Err(OpenError::WindowSplitsChar { offset });
        }
    }
    Ok(start..end)
}
