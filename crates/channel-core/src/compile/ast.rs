// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! The statement/expression tree the compiler produces.
//!
//! This is the second tree: built from a parsed [`Tuple`](crate::node::Tuple),
//! consumed by the evaluator. It holds no evaluation state — names are not
//! resolved and nothing is typed. Leaf [`Expr::Value`]s wrap the original
//! parse-tree nodes unchanged.

use ecow::EcoString;

use super::operators::{Associativity, Operator};
use crate::node::Node;

/// One compiled tuple.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `var name = value`.
    VariableDeclaration {
        /// The declared name.
        name: EcoString,
        /// The initialiser.
        value: Expr,
    },

    /// `if (c1): {b1} (c2): {b2} else: {fallback}`, and the `switch`
    /// desugaring into the same shape.
    Conditional {
        /// The branches, in source order.
        branches: Vec<Branch>,
    },

    /// `return` with an optional value.
    Return {
        /// The returned expression, if any.
        value: Option<Expr>,
    },

    /// `$name = value` or `@name = value`.
    Assignment {
        /// The target's sigil: `'$'` or `'@'`.
        sigil: char,
        /// The target name.
        target: EcoString,
        /// The assigned expression.
        value: Expr,
    },

    /// Anything else: a bare expression tuple.
    Expression(Expr),
}

/// One arm of a [`Statement::Conditional`].
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// The branch condition; `None` for an `else` arm.
    pub condition: Option<Expr>,
    /// The compiled body, one statement per tuple of the `{}` group.
    pub body: Vec<Statement>,
}

/// A compiled expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal or reference atom, carried over from the parse tree.
    Value(Node),

    /// A bare word or symbolic applied to zero or more arguments.
    Call {
        /// The called name.
        callee: Node,
        /// The argument values, in source order.
        arguments: Vec<Expr>,
    },

    /// An operator applied to its resolved operands.
    Operation {
        /// The operator token.
        operator: EcoString,
        /// 1 for prefix operators, 2 for infix.
        arity: u8,
        /// Grouping direction, from the operator table.
        associativity: Associativity,
        /// The operand subtrees, in source order.
        operands: Vec<Expr>,
    },
}

impl Expr {
    /// Wraps a parse-tree atom.
    #[must_use]
    pub fn value(node: Node) -> Self {
        Self::Value(node)
    }

    /// Builds a call term.
    #[must_use]
    pub fn call(callee: Node, arguments: Vec<Expr>) -> Self {
        Self::Call { callee, arguments }
    }

    /// Builds an operation from a table entry and its operands.
    #[must_use]
    pub fn operation(operator: Operator, operands: Vec<Expr>) -> Self {
        Self::Operation {
            operator: operator.token.into(),
            arity: operator.arity,
            associativity: operator.associativity,
            operands,
        }
    }
}
