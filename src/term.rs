//! Elixir Term Conversion Utilities
//!
//! Converts nodes to Elixir maps.

use rustler::{Encoder, Env, NewBinary, NifResult, Term};

use crate::reader::node::{Attribute, Node, NodeKind};

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    begin,
    end,
    text,
    comment,
    xml_header,
    invalid,
    kind,
    prefix,
    self_closing,
    line,
    column_start,
    offset,
    depth,
    attributes,
}

fn kind_atom(node_kind: NodeKind) -> rustler::Atom {
    match node_kind {
        NodeKind::Invalid => invalid(),
        NodeKind::Begin => begin(),
        NodeKind::End => end(),
        NodeKind::Text => text(),
        NodeKind::Comment => comment(),
        NodeKind::XmlHeader => xml_header(),
    }
}

/// Convert a node to `%{kind: atom, text: binary, ...}`
pub fn node_to_term<'a>(env: Env<'a>, node: &Node) -> NifResult<Term<'a>> {
    let prefix_term = node
        .prefix
        .as_deref()
        .map(|p| str_to_binary(env, p))
        .encode(env);
    let pairs: Vec<(Term<'a>, Term<'a>)> = vec![
        (kind().encode(env), kind_atom(node.kind).encode(env)),
        (text().encode(env), str_to_binary(env, &node.text)),
        (prefix().encode(env), prefix_term),
        (self_closing().encode(env), node.self_closing.encode(env)),
        (line().encode(env), node.line.encode(env)),
        (column_start().encode(env), node.column_start.encode(env)),
        (offset().encode(env), node.offset.encode(env)),
        (depth().encode(env), node.depth.encode(env)),
        (attributes().encode(env), attributes_to_term(env, &node.attributes)),
    ];
    Term::map_from_pairs(env, &pairs)
}

/// Convert nodes to a list of maps
pub fn nodes_to_term<'a>(env: Env<'a>, nodes: &[Node]) -> NifResult<Term<'a>> {
    let mut list = Term::list_new_empty(env);
    for node in nodes.iter().rev() {
        list = list.list_prepend(node_to_term(env, node)?);
    }
    Ok(list)
}

/// Attributes as a list of `{qualified_name, value | nil}` tuples
fn attributes_to_term<'a>(env: Env<'a>, attrs: &[Attribute]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for attr in attrs.iter().rev() {
        let name = str_to_binary(env, &attr.qualified_name());
        let value = attr.value.as_deref().map(|v| str_to_binary(env, v));
        list = list.list_prepend((name, value).encode(env));
    }
    list
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
