// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! Compile errors.
//!
//! A tuple either fully compiles or fails as a unit; each error carries
//! the offending tuple or node so the surrounding tooling can point at a
//! source location once it layers line/column tracking on top.

use miette::Diagnostic;
use thiserror::Error;

use crate::node::{Node, Tuple};

/// An error raised while compiling one tuple into a statement.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum CompileError {
    /// A `var` tuple that is not `var <name> = <expression>`.
    #[error("malformed declaration (expected `var <name> = <expression>`): {tuple}")]
    MalformedDeclaration {
        /// The whole offending tuple.
        tuple: Tuple,
    },

    /// An assignment with nothing after the `=`.
    #[error("assignment is missing its value: {tuple}")]
    MalformedAssignment {
        /// The whole offending tuple.
        tuple: Tuple,
    },

    /// An `if`/`switch` with no branches or a missing switch subject.
    #[error("conditional has no branches: {tuple}")]
    MissingBranches {
        /// The whole offending tuple.
        tuple: Tuple,
    },

    /// An `if`/`switch` branch that is not `(condition): {body}` or
    /// `else: {body}`.
    #[error("malformed conditional branch: {node}")]
    MalformedBranch {
        /// The value that should have been a branch label.
        node: Node,
    },

    /// An operator with too few operand slots left in the output.
    #[error("operator '{operator}' is missing an operand")]
    MissingOperand {
        /// The starved operator token.
        operator: &'static str,
    },

    /// A multi-value term whose first value cannot be called.
    #[error("'{node}' cannot take arguments: only bare words and symbolics can")]
    NotCallable {
        /// The non-callable head of the term.
        node: Node,
    },

    /// An expression position with no values at all.
    #[error("expected an expression, found nothing")]
    EmptyExpression,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TupleKind;

    #[test]
    fn errors_render_the_offending_node() {
        let err = CompileError::NotCallable {
            node: Node::number("1"),
        };
        assert_eq!(
            err.to_string(),
            "'1' cannot take arguments: only bare words and symbolics can"
        );

        let err = CompileError::MalformedDeclaration {
            tuple: Tuple::new(
                TupleKind::File,
                vec![Node::bare_word("var"), Node::bare_word("x")],
            ),
        };
        assert_eq!(
            err.to_string(),
            "malformed declaration (expected `var <name> = <expression>`): var x"
        );
    }
}
