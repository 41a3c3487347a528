//! Elixir NIF entry points
//!
//! Exposes a cursor as a resource plus a one-shot `tokenize/1`.

use rustler::{Encoder, Env, Error as NifError, NifResult, ResourceArc, Term};

use crate::reader::cursor::Cursor;
use crate::resource::{CursorRef, CursorResource};
use crate::term::{node_to_term, nodes_to_term};

fn with_cursor<R>(cursor: &CursorRef, f: impl FnOnce(&mut Cursor) -> R) -> NifResult<R> {
    let mut guard = cursor.lock().map_err(|msg| NifError::Term(Box::new(msg)))?;
    Ok(f(&mut guard))
}

/// Create an unopened cursor
#[rustler::nif]
fn cursor_new() -> CursorRef {
    ResourceArc::new(CursorResource::new())
}

/// Open an in-memory string
#[rustler::nif]
fn cursor_open_string(cursor: CursorRef, name: &str, content: &str) -> NifResult<bool> {
    with_cursor(&cursor, |c| c.open_string(name, content))
}

/// Open `content[start..start + length]`
#[rustler::nif]
fn cursor_open_window(
    cursor: CursorRef,
    name: &str,
    content: &str,
    start: usize,
    length: usize,
) -> NifResult<bool> {
    with_cursor(&cursor, |c| c.open_string_window(name, content, start, length))
}

/// Open a file; reads it eagerly
#[rustler::nif(schedule = "DirtyIo")]
fn cursor_open_file(cursor: CursorRef, path: &str) -> NifResult<bool> {
    with_cursor(&cursor, |c| c.open_file(path))
}

/// Advance one node; false once done
#[rustler::nif]
fn cursor_next_node(cursor: CursorRef) -> NifResult<bool> {
    with_cursor(&cursor, |c| c.advance())
}

/// Current node as a map
#[rustler::nif]
fn cursor_node<'a>(env: Env<'a>, cursor: CursorRef) -> NifResult<Term<'a>> {
    let node = with_cursor(&cursor, |c| c.current_node().clone())?;
    node_to_term(env, &node)
}

#[rustler::nif]
fn cursor_done(cursor: CursorRef) -> NifResult<bool> {
    with_cursor(&cursor, |c| c.done())
}

#[rustler::nif]
fn cursor_errored(cursor: CursorRef) -> NifResult<bool> {
    with_cursor(&cursor, |c| c.errored())
}

/// Tokenize a whole binary: `{:ok, nodes}` or `{:error, message}`
#[rustler::nif(schedule = "DirtyCpu")]
fn tokenize<'a>(env: Env<'a>, input: &str) -> NifResult<Term<'a>> {
    match crate::tokenize("input", input) {
        Ok(nodes) => Ok((rustler::types::atom::ok(), nodes_to_term(env, &nodes)?).encode(env)),
        Err(err) => Ok((rustler::types::atom::error(), err.to_string()).encode(env)),
    }
}

rustler::init!("Elixir.PullXML.Native");
