// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! Compiling parsed tuples into statements.
//!
//! The parser leaves a document as a flat [`TupleSet`](crate::node::TupleSet):
//! values grouped into tuples with no notion of precedence or statement
//! kind. This module adds both. [`compile_tuple`] classifies a tuple as a
//! declaration, conditional, return, assignment, or bare expression, and
//! rebuilds its value sequence into an [`Expr`] tree using a fixed
//! operator table. [`compile_document`] does that for every tuple.
//!
//! # Example
//!
//! ```
//! use channel_core::compile::{compile_document, Statement};
//! use channel_core::parse::parse_document;
//!
//! let doc = parse_document("var greeting = \"hello\"\nprint greeting").unwrap();
//! let statements = compile_document(&doc).unwrap();
//! assert_eq!(statements.len(), 2);
//! assert!(matches!(statements[0], Statement::VariableDeclaration { .. }));
//! ```

mod ast;
mod compiler;
mod error;
mod operators;

pub use ast::{Branch, Expr, Statement};
pub use compiler::{compile_document, compile_tuple};
pub use error::CompileError;
pub use operators::{binary_operator, unary_operator, Associativity, Operator};
