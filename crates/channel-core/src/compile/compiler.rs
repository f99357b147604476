// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! Turns one parsed tuple into one [`Statement`].
//!
//! Classification comes first, checked in order against the tuple's
//! leading values: `var`, `if`, `switch`, `return`, then
//! `<reference> = ...` assignment; anything else is a bare expression.
//!
//! Expressions run through a shunting-yard reordering. The operator stack
//! drains into an output sequence of operators and *terms* — maximal runs
//! of consecutive non-operator values. A `unary` flag (true at the start
//! and after every operator) decides which table a symbol token is looked
//! up in, which is all the disambiguation unary-vs-binary needs. The
//! reordered output is then folded back into a tree: each operator takes
//! exactly its arity in operand subtrees, and each term becomes either a
//! plain value or a call — a bare word or symbolic head applied to the
//! values after it, zero arguments included.

use std::mem;

use super::ast::{Branch, Expr, Statement};
use super::error::CompileError;
use super::operators::{binary_operator, equality, unary_operator, Associativity, Operator};
use crate::node::{Node, Tuple, TupleKind, TupleSet};

/// Compiles every tuple of a document, independently and in source order.
///
/// # Errors
///
/// Fails with the first tuple's [`CompileError`]; later tuples are not
/// attempted. Callers that want to continue past failures can map
/// [`compile_tuple`] over the tuples themselves.
pub fn compile_document(document: &TupleSet) -> Result<Vec<Statement>, CompileError> {
    document.tuples.iter().map(compile_tuple).collect()
}

/// Compiles one tuple into one statement.
///
/// # Errors
///
/// Returns a [`CompileError`] carrying the offending tuple or node; the
/// tuple either fully compiles or fails as a unit.
///
/// # Examples
///
/// ```
/// use channel_core::compile::{compile_tuple, Statement};
/// use channel_core::parse::parse_document;
///
/// let doc = parse_document("var x = 1 + 2").unwrap();
/// let statement = compile_tuple(&doc.tuples[0]).unwrap();
/// assert!(matches!(statement, Statement::VariableDeclaration { .. }));
/// ```
pub fn compile_tuple(tuple: &Tuple) -> Result<Statement, CompileError> {
    match tuple.values.first() {
        Some(Node::BareWord(word)) if word == "var" => compile_declaration(tuple),
        Some(Node::BareWord(word)) if word == "if" => compile_if(tuple),
        Some(Node::BareWord(word)) if word == "switch" => compile_switch(tuple),
        Some(Node::BareWord(word)) if word == "return" => compile_return(&tuple.values[1..]),
        Some(Node::Reference { .. }) if is_assignment(&tuple.values) => compile_assignment(tuple),
        _ => Ok(Statement::Expression(compile_expression(&tuple.values)?)),
    }
}

fn is_assignment(values: &[Node]) -> bool {
    matches!(values.get(1), Some(Node::Symbolic(token)) if token == "=")
}

/// `var <name> = <expression>`.
fn compile_declaration(tuple: &Tuple) -> Result<Statement, CompileError> {
    if let [_, Node::BareWord(name), Node::Symbolic(eq), value @ ..] = tuple.values.as_slice() {
        if eq == "=" && !value.is_empty() {
            return Ok(Statement::VariableDeclaration {
                name: name.clone(),
                value: compile_expression(value)?,
            });
        }
    }
    Err(CompileError::MalformedDeclaration {
        tuple: tuple.clone(),
    })
}

/// `$name = <expression>` — the classifier already checked the shape of
/// the first two values.
fn compile_assignment(tuple: &Tuple) -> Result<Statement, CompileError> {
    let [Node::Reference { sigil, name }, _, value @ ..] = tuple.values.as_slice() else {
        return Err(CompileError::MalformedAssignment {
            tuple: tuple.clone(),
        });
    };
    if value.is_empty() {
        return Err(CompileError::MalformedAssignment {
            tuple: tuple.clone(),
        });
    }
    Ok(Statement::Assignment {
        sigil: *sigil,
        target: name.clone(),
        value: compile_expression(value)?,
    })
}

fn compile_return(values: &[Node]) -> Result<Statement, CompileError> {
    let value = if values.is_empty() {
        None
    } else {
        Some(compile_expression(values)?)
    };
    Ok(Statement::Return { value })
}

/// `if (c1): {b1} (c2): {b2} else: {fallback}`.
fn compile_if(tuple: &Tuple) -> Result<Statement, CompileError> {
    compile_conditional(tuple, &tuple.values[1..], None)
}

/// `switch subject (v1): {b1} ... else: {fallback}`: each non-else branch
/// condition becomes `subject == v`.
fn compile_switch(tuple: &Tuple) -> Result<Statement, CompileError> {
    let [_, subject, labels @ ..] = tuple.values.as_slice() else {
        return Err(CompileError::MissingBranches {
            tuple: tuple.clone(),
        });
    };
    let subject = term_expr(vec![subject.clone()])?;
    compile_conditional(tuple, labels, Some(&subject))
}

fn compile_conditional(
    tuple: &Tuple,
    labels: &[Node],
    subject: Option<&Expr>,
) -> Result<Statement, CompileError> {
    if labels.is_empty() {
        return Err(CompileError::MissingBranches {
            tuple: tuple.clone(),
        });
    }
    let branches = labels
        .iter()
        .map(|label| compile_branch(label, subject))
        .collect::<Result<_, _>>()?;
    Ok(Statement::Conditional { branches })
}

/// One `(condition): {body}` or `else: {body}` arm.
fn compile_branch(label: &Node, subject: Option<&Expr>) -> Result<Branch, CompileError> {
    let Node::Label { key, value } = label else {
        return Err(CompileError::MalformedBranch {
            node: label.clone(),
        });
    };
    let condition = match key.as_ref() {
        Node::BareWord(word) if word == "else" => None,
        Node::TupleSet(set) if set.kind == TupleKind::Comma => {
            let [condition] = set.tuples.as_slice() else {
                return Err(CompileError::MalformedBranch {
                    node: label.clone(),
                });
            };
            let test = compile_expression(&condition.values)?;
            Some(match subject {
                Some(subject) => Expr::operation(equality(), vec![subject.clone(), test]),
                None => test,
            })
        }
        _ => {
            return Err(CompileError::MalformedBranch {
                node: label.clone(),
            })
        }
    };
    let Node::TupleSet(body) = value.as_ref() else {
        return Err(CompileError::MalformedBranch {
            node: label.clone(),
        });
    };
    if body.kind != TupleKind::Line {
        return Err(CompileError::MalformedBranch {
            node: label.clone(),
        });
    }
    let body = body
        .tuples
        .iter()
        .map(compile_tuple)
        .collect::<Result<_, _>>()?;
    Ok(Branch { condition, body })
}

/// Compiles a flat value sequence into an expression tree.
pub(crate) fn compile_expression(values: &[Node]) -> Result<Expr, CompileError> {
    if values.is_empty() {
        return Err(CompileError::EmptyExpression);
    }
    let mut output = reorder(values);
    let expr = build(&mut output)?;
    debug_assert!(output.is_empty(), "reordered output must be fully consumed");
    Ok(expr)
}

/// One entry of the reordered output: an operator, or a *term* — a
/// maximal run of consecutive non-operator values.
#[derive(Debug)]
enum Reordered {
    Term(Vec<Node>),
    Operator(Operator),
}

/// Shunting yard. The output ends up in postfix order: consuming it from
/// the back yields each operator before its operands.
fn reorder(values: &[Node]) -> Vec<Reordered> {
    let mut output = Vec::new();
    let mut stack: Vec<Operator> = Vec::new();
    let mut term: Vec<Node> = Vec::new();
    // True at the start and after every operator: the next symbol token
    // would be a prefix use, not an infix one.
    let mut unary = true;

    for value in values {
        let incoming = match value.atom_text() {
            Some(token) if value.is_callable() => {
                if unary {
                    unary_operator(token)
                } else {
                    binary_operator(token)
                }
            }
            _ => None,
        };
        match incoming {
            Some(incoming) => {
                if !term.is_empty() {
                    output.push(Reordered::Term(mem::take(&mut term)));
                }
                while let Some(top) = stack.last().copied() {
                    if !outranks(top, incoming) {
                        break;
                    }
                    stack.pop();
                    output.push(Reordered::Operator(top));
                }
                stack.push(incoming);
                unary = true;
            }
            None => {
                term.push(value.clone());
                unary = false;
            }
        }
    }

    if !term.is_empty() {
        output.push(Reordered::Term(term));
    }
    while let Some(top) = stack.pop() {
        output.push(Reordered::Operator(top));
    }
    output
}

/// Whether the stacked operator must be emitted before the incoming one.
fn outranks(top: Operator, incoming: Operator) -> bool {
    match top.associativity {
        Associativity::LeftToRight => top.precedence >= incoming.precedence,
        Associativity::RightToLeft => top.precedence > incoming.precedence,
    }
}

/// Folds the reordered output back into a tree, consuming from the back.
fn build(output: &mut Vec<Reordered>) -> Result<Expr, CompileError> {
    match output.pop() {
        None => Err(CompileError::EmptyExpression),
        Some(Reordered::Term(nodes)) => term_expr(nodes),
        Some(Reordered::Operator(operator)) => {
            let mut operands = Vec::with_capacity(usize::from(operator.arity));
            for _ in 0..operator.arity {
                if output.is_empty() {
                    return Err(CompileError::MissingOperand {
                        operator: operator.token,
                    });
                }
                operands.push(build(output)?);
            }
            // Popped right-to-left; operands read left-to-right.
            operands.reverse();
            Ok(Expr::operation(operator, operands))
        }
    }
}

/// One term: a single literal/reference is a value; a bare word or
/// symbolic head is a call with the remaining values as arguments —
/// including the zero-argument case.
fn term_expr(nodes: Vec<Node>) -> Result<Expr, CompileError> {
    let mut nodes = nodes.into_iter();
    let Some(head) = nodes.next() else {
        return Err(CompileError::EmptyExpression);
    };
    if head.is_callable() {
        Ok(Expr::call(head, nodes.map(Expr::value).collect()))
    } else if nodes.len() == 0 {
        Ok(Expr::value(head))
    } else {
        Err(CompileError::NotCallable { node: head })
    }
}
