// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! Channel language front end.
//!
//! This crate contains the first two stages of the Channel pipeline:
//! - Parsing: one pass over the source, one character at a time, into a
//!   generic tree of tuples and atoms
//! - Compiling: classifying each tuple as a statement and rebuilding its
//!   values into expression trees with operator precedence applied
//!
//! The parser is deliberately ignorant of the language's keywords and
//! operators; everything Channel-specific lives in the compiler.

#![doc = include_str!("../../../README.md")]

pub mod compile;
pub mod node;
pub mod parse;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::compile::{compile_document, Expr, Statement};
    pub use crate::node::{Node, Tuple, TupleSet};
    pub use crate::parse::parse_document;
}
