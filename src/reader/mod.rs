//! XML Reader Module
//!
//! The pull surface over the core tokenizer:
//! - Node: the record produced for each token
//! - Source: buffer loading and windowing
//! - Cursor: the stateful driver and its iteration helpers

pub mod cursor;
pub mod node;
pub mod source;
