//! Parallel Window Scanning
//!
//! Uses Rayon to scan several windows of one buffer at once. Every window
//! gets its own cursor, so no scan state is shared between workers.

use std::ops::Range;
use std::sync::Arc;

use rayon::prelude::*;

use crate::core::tokenizer::CursorOptions;
use crate::error::Error;
use crate::reader::cursor::Cursor;
use crate::reader::node::Node;
use crate::reader::source::BufferSource;

/// Scan each window of `text` in parallel
///
/// Results are returned in the order of `windows`. Positions in each
/// result are relative to that window.
pub fn scan_windows(
    name: &str,
    text: Arc<str>,
    windows: &[Range<usize>],
    options: CursorOptions,
) -> Vec<Result<Vec<Node>, Error>> {
    windows
        .par_iter()
        .map(|window| scan_window(name, &text, window, options))
        .collect()
}

/// Scan one window on the current thread
pub fn scan_window(
    name: &str,
    text: &Arc<str>,
    window: &Range<usize>,
    options: CursorOptions,
) -> Result<Vec<Node>, Error> {
    let length = window.end.saturating_sub(window.start);
    let source = BufferSource::new(name, Arc::clone(text)).restrict(window.start, length)?;

    let mut cursor = Cursor::with_options(options);
    cursor.open_source(source);
    let nodes = cursor.nodes().collect::<Result<Vec<_>, _>>()?;
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::tokenize;
    use pretty_assertions::assert_eq;

    const TEXT: &str = "<tag>text<!--test-comment--></tag>\n<sct/><gat>\n<inner>\n</inner></gat>";

    #[test]
    fn test_parallel_windows_match_standalone() {
        let windows = [0..35, 35..46, 47..TEXT.len()];
        let results = scan_windows("test", Arc::from(TEXT), &windows, CursorOptions::default());
        assert_eq!(results.len(), 3);

        for (window, result) in windows.iter().zip(results) {
            let expected = tokenize(&TEXT[window.clone()]).unwrap();
            assert_eq!(result.unwrap(), expected);
        }
    }

    #[test]
    fn test_errors_are_per_window() {
        let text: Arc<str> = Arc::from("<a@><b/>");
        let windows = [0..4, 4..8, 6..20];
        let results = scan_windows("test", text, &windows, CursorOptions::default());

        assert!(matches!(results[0], Err(Error::Parse(_))));
        assert_eq!(results[1].as_ref().unwrap().len(), 1);
        assert!(matches!(results[2], Err(Error::Open(_))));
    }
}
