// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for Channel documents.
//!
//! The parser is a one-character-at-a-time state machine. Characters are
//! fed to the innermost active lexer; a character the lexer cannot use is
//! handed back and reprocessed one level up, so every byte drives exactly
//! one committed state transition and nothing is ever re-read.
//!
//! The layers, bottom up:
//!
//! - atom lexers for bare words, symbolic runs, numbers, references and
//!   string constants;
//! - the tuple assembler, collecting whitespace-separated values into rows
//!   and forming `key: value` labels;
//! - the tuple-set assembler, collecting rows split on `\n` or `,` until
//!   `}`, `)`, or end of input.
//!
//! # Example
//!
//! ```
//! use channel_core::node::{Node, TupleKind};
//! use channel_core::parse::parse_document;
//!
//! let doc = parse_document("if ($x > 1): {\nprint 'big'\n}").unwrap();
//! assert_eq!(doc.kind, TupleKind::File);
//! assert_eq!(doc.tuples[0].values[0], Node::bare_word("if"));
//! ```
//!
//! Parsing either consumes the whole stream or fails with a structural
//! [`ParseError`]; there is no recovery and the partial tree is discarded.

mod error;
mod lexer;
mod parser;


pub use error::ParseError;
pub use parser::parse_document;
