//! Core XML scanning primitives
//!
//! This module contains the fundamental building blocks for tokenizing:
//! - Encoding: byte order mark and declared encoding handling
//! - Position: line/column tracking relative to the scanned window
//! - Names: XML name character classes
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Attributes: Start tag body scanning
//! - Tokenizer: State machine for XML token extraction

pub mod attributes;
pub mod encoding;
pub mod names;
pub mod position;
pub mod scanner;
pub mod tokenizer;
