// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests: source text through the parser and compiler.

use channel_core::compile::{compile_document, CompileError, Expr, Statement};
use channel_core::node::Node;
use channel_core::parse::{parse_document, ParseError};

fn compile(source: &str) -> Vec<Statement> {
    let doc = parse_document(source).unwrap();
    compile_document(&doc).unwrap()
}

#[test]
fn a_small_program_compiles() {
    let statements = compile(
        "var count = 0\n\
         var greeting = 'hello '\n\
         if ($ready): {\n\
             $count = $count + 1\n\
             print (greeting . name)\n\
         } else: {\n\
             wait\n\
         }\n\
         return $count",
    );
    assert_eq!(statements.len(), 4);
    assert!(matches!(
        statements[0],
        Statement::VariableDeclaration { .. }
    ));
    assert!(matches!(
        statements[1],
        Statement::VariableDeclaration { .. }
    ));
    assert!(matches!(statements[2], Statement::Conditional { .. }));
    assert!(matches!(statements[3], Statement::Return { .. }));
}

#[test]
fn comments_survive_as_string_values() {
    let statements = compile("blah\n# note to self");
    let Statement::Expression(Expr::Value(node)) = &statements[1] else {
        panic!("expected the comment as a plain value");
    };
    assert_eq!(node, &Node::string("# ", "note to self"));
}

// A line comment consumes its own newline, so the split that newline
// would have caused never happens: the next line continues the same
// tuple. Comments therefore attach to the line they follow, and a
// whole-line comment folds into the statement below it.
#[test]
fn a_comment_line_joins_the_following_tuple() {
    let doc = parse_document("# setup\nvar x = 1").unwrap();
    assert_eq!(doc.tuples.len(), 1);
    assert_eq!(doc.tuples[0].values[0], Node::string("# ", "setup"));
    assert_eq!(doc.tuples[0].values[1], Node::bare_word("var"));
}

#[test]
fn nested_groups_compile_from_the_inside_out() {
    let statements = compile("blah (1 + 2, wut) {a\nb}");
    let Statement::Expression(Expr::Call { callee, arguments }) = &statements[0] else {
        panic!("expected a call");
    };
    assert_eq!(callee, &Node::bare_word("blah"));
    assert_eq!(arguments.len(), 2);
    assert!(matches!(arguments[0], Expr::Value(Node::TupleSet(_))));
    assert!(matches!(arguments[1], Expr::Value(Node::TupleSet(_))));
}

#[test]
fn parse_errors_surface_before_compilation() {
    assert!(matches!(
        parse_document("blah {oops"),
        Err(ParseError::UnterminatedGroup { .. })
    ));
    assert!(matches!(
        parse_document("'oops"),
        Err(ParseError::UnterminatedString { .. })
    ));
}

#[test]
fn compile_errors_name_the_offending_tuple() {
    let doc = parse_document("var oops").unwrap();
    let err = compile_document(&doc).unwrap_err();
    assert!(matches!(err, CompileError::MalformedDeclaration { .. }));
    assert!(err.to_string().contains("var oops"));
}

#[test]
fn custom_delimited_strings_pass_through_the_pipeline() {
    let statements = compile("blah #[weird \\] body]");
    let Statement::Expression(Expr::Call { arguments, .. }) = &statements[0] else {
        panic!("expected a call");
    };
    assert_eq!(
        arguments[0],
        Expr::Value(Node::string("#[", "weird ] body"))
    );
}
