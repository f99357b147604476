// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! Tuple and tuple-set assembly, and the document driver.
//!
//! This is the upper half of the parser: the same one-character-at-a-time
//! protocol as the atom lexers in [`super::lexer`], one level up. A
//! [`TupleLexer`] collects whitespace-separated values into one row; a
//! [`TupleSetLexer`] collects rows separated by its splitter until its
//! terminator (or end of input, for a whole document).
//!
//! Dispatch is a single-character lookahead: the first character of every
//! new value picks its lexer (see [`ValueLexer::dispatch`]), and that same
//! character is then fed to the chosen lexer. A rejected character falls
//! through to the parent context and is reprocessed there exactly once —
//! no character is ever dropped or consumed twice, and no completed node
//! is ever revisited.
//!
//! Label formation uses a one-value lookahead buffer: the most recently
//! completed value stays uncommitted until the next character shows
//! whether a `:` follows it.

use std::mem;

use super::error::ParseError;
use super::lexer::{is_whitespace, NumberLexer, ReferenceLexer, Step, StringLexer, WordLexer};
use crate::node::{Node, Tuple, TupleKind, TupleSet};

/// Parses one whole source document.
///
/// The document is a File-mode tuple set: tuples split on newlines,
/// terminated only by end of input.
///
/// # Errors
///
/// Returns a [`ParseError`] when the stream ends inside an unterminated
/// `{`/`(` group or string constant, or when a character arrives that no
/// node can accept.
///
/// # Examples
///
/// ```
/// use channel_core::node::Node;
/// use channel_core::parse::parse_document;
///
/// let doc = parse_document("var x = 1\nprint $x").unwrap();
/// assert_eq!(doc.tuples.len(), 2);
/// assert_eq!(doc.tuples[1].values[1], Node::reference('$', "x"));
/// ```
pub fn parse_document(source: &str) -> Result<TupleSet, ParseError> {
    let mut root = TupleSetLexer::file();
    for c in source.chars() {
        match root.advance(c)? {
            Step::Continue => {}
            // File mode has no terminator, so the root can only finish at
            // end of input.
            Step::Complete | Step::Reject(_) => break,
        }
    }
    root.finish()
}

/// One in-flight value: any lexer the dispatcher can start, plus the
/// label builder the tuple starts itself on `:`.
#[derive(Debug)]
pub(crate) enum ValueLexer {
    Word(WordLexer),
    Number(NumberLexer),
    Reference(ReferenceLexer),
    Str(StringLexer),
    Set(Box<TupleSetLexer>),
    Label(Box<LabelLexer>),
}

impl ValueLexer {
    /// The node dispatch table: classifies one lookahead character and
    /// returns the lexer that should consume from it. Pure — the caller
    /// feeds the same character to the returned lexer.
    pub(crate) fn dispatch(c: char) -> Self {
        match c {
            '{' => Self::Set(Box::new(TupleSetLexer::bracketed(TupleKind::Line))),
            '(' => Self::Set(Box::new(TupleSetLexer::bracketed(TupleKind::Comma))),
            '"' | '\'' | '#' => Self::Str(StringLexer::new()),
            '$' | '@' => Self::Reference(ReferenceLexer::new()),
            c if c.is_ascii_digit() => Self::Number(NumberLexer::new()),
            _ => Self::Word(WordLexer::new()),
        }
    }

    fn advance(&mut self, c: char) -> Result<Step, ParseError> {
        match self {
            Self::Word(lexer) => Ok(lexer.advance(c)),
            Self::Number(lexer) => Ok(lexer.advance(c)),
            Self::Reference(lexer) => Ok(lexer.advance(c)),
            Self::Str(lexer) => Ok(lexer.advance(c)),
            Self::Set(lexer) => lexer.advance(c),
            Self::Label(lexer) => lexer.advance(c),
        }
    }

    /// Takes the finished node. Callers only invoke this after the lexer
    /// signalled `Reject` or `Complete`.
    fn into_node(self) -> Node {
        match self {
            Self::Word(lexer) => lexer.into_node(),
            Self::Number(lexer) => lexer.into_node(),
            Self::Reference(lexer) => lexer.into_node(),
            Self::Str(lexer) => lexer.into_node(),
            Self::Set(lexer) => Node::TupleSet(lexer.into_set()),
            Self::Label(lexer) => lexer.into_node(),
        }
    }

    /// End of input while this value is still active.
    fn finish(self) -> Result<Node, ParseError> {
        match self {
            Self::Word(lexer) => Ok(lexer.into_node()),
            Self::Number(lexer) => Ok(lexer.into_node()),
            Self::Reference(lexer) => Ok(lexer.into_node()),
            Self::Str(lexer) => lexer.finish(),
            Self::Set(lexer) => Ok(Node::TupleSet(lexer.finish()?)),
            Self::Label(lexer) => lexer.finish(),
        }
    }
}

/// Builds a `key: value` pair. Created by the tuple when a `:` arrives;
/// the key is the tuple's uncommitted lookahead value.
#[derive(Debug)]
pub(crate) struct LabelLexer {
    key: Node,
    value: Option<ValueLexer>,
}

impl LabelLexer {
    fn new(key: Node) -> Self {
        Self { key, value: None }
    }

    fn advance(&mut self, c: char) -> Result<Step, ParseError> {
        match &mut self.value {
            // The label finishes exactly when its value does.
            Some(value) => value.advance(c),
            None => {
                // Whitespace between the `:` and the value is swallowed,
                // newlines included.
                if is_whitespace(c) {
                    return Ok(Step::Continue);
                }
                let mut lexer = ValueLexer::dispatch(c);
                match lexer.advance(c)? {
                    Step::Continue => {
                        self.value = Some(lexer);
                        Ok(Step::Continue)
                    }
                    // The dispatched lexer refused its own first character:
                    // nothing can consume it.
                    Step::Reject(rejected) => Err(ParseError::UnexpectedCharacter(rejected)),
                    Step::Complete => Err(ParseError::UnexpectedCharacter(c)),
                }
            }
        }
    }

    fn into_node(self) -> Node {
        match self.value {
            Some(value) => Node::label(self.key, value.into_node()),
            // Unreachable by protocol: a label only completes via its value.
            None => self.key,
        }
    }

    fn finish(self) -> Result<Node, ParseError> {
        match self.value {
            Some(value) => Ok(Node::label(self.key, value.finish()?)),
            None => Err(ParseError::LabelWithoutValue),
        }
    }
}

/// Collects whitespace-separated values into one [`Tuple`].
///
/// Completion is signalled through the shared [`Step`] protocol: the
/// splitter character completes the tuple (`Complete`), while the set's
/// terminator is handed back unconsumed (`Reject`) for the parent
/// [`TupleSetLexer`] to act on.
#[derive(Debug)]
pub(crate) struct TupleLexer {
    kind: TupleKind,
    values: Vec<Node>,
    /// Lookahead buffer: the last completed value, uncommitted until we
    /// know whether a `:` follows it.
    pending: Option<Node>,
    current: Option<ValueLexer>,
}

impl TupleLexer {
    fn new(kind: TupleKind) -> Self {
        Self {
            kind,
            values: Vec::new(),
            pending: None,
            current: None,
        }
    }

    /// Moves a freshly completed value into the lookahead buffer,
    /// committing whatever was there before.
    fn buffer(&mut self, node: Node) {
        if let Some(previous) = self.pending.replace(node) {
            self.values.push(previous);
        }
    }

    fn advance(&mut self, c: char) -> Result<Step, ParseError> {
        let mut c = c;
        if let Some(current) = &mut self.current {
            match current.advance(c)? {
                Step::Continue => return Ok(Step::Continue),
                Step::Complete => {
                    if let Some(finished) = self.current.take() {
                        self.buffer(finished.into_node());
                    }
                    return Ok(Step::Continue);
                }
                Step::Reject(rejected) => {
                    // Fall through: the finished node is buffered and the
                    // rejected character is reprocessed at this level.
                    if let Some(finished) = self.current.take() {
                        self.buffer(finished.into_node());
                    }
                    c = rejected;
                }
            }
        }
        self.advance_own(c)
    }

    fn advance_own(&mut self, c: char) -> Result<Step, ParseError> {
        if c == self.kind.splitter() {
            return Ok(Step::Complete);
        }
        if Some(c) == self.kind.terminator() {
            return Ok(Step::Reject(c));
        }
        if c == ':' {
            let key = self.pending.take().ok_or(ParseError::LabelWithoutKey)?;
            self.current = Some(ValueLexer::Label(Box::new(LabelLexer::new(key))));
            return Ok(Step::Continue);
        }
        if is_whitespace(c) {
            return Ok(Step::Continue);
        }
        let mut lexer = ValueLexer::dispatch(c);
        match lexer.advance(c)? {
            Step::Continue => {
                self.current = Some(lexer);
                Ok(Step::Continue)
            }
            // Nothing can start from this character (stray `)`, `]`, a
            // comma outside a Comma group, ...).
            Step::Reject(rejected) => Err(ParseError::UnexpectedCharacter(rejected)),
            Step::Complete => Err(ParseError::UnexpectedCharacter(c)),
        }
    }

    /// Takes the finished tuple after `Complete`/`Reject`.
    fn into_tuple(mut self) -> Tuple {
        if let Some(pending) = self.pending.take() {
            self.values.push(pending);
        }
        Tuple::new(self.kind, self.values)
    }

    fn finish(mut self) -> Result<Tuple, ParseError> {
        if let Some(current) = self.current.take() {
            let node = current.finish()?;
            self.buffer(node);
        }
        Ok(self.into_tuple())
    }
}

/// Collects tuples into a [`TupleSet`], dropping empty ones.
#[derive(Debug)]
pub(crate) struct TupleSetLexer {
    kind: TupleKind,
    /// False until the opening bracket has been consumed. File-mode sets
    /// have no bracket and start opened.
    opened: bool,
    tuples: Vec<Tuple>,
    current: TupleLexer,
}

impl TupleSetLexer {
    /// The root of a document: File mode, no opening bracket.
    fn file() -> Self {
        Self {
            kind: TupleKind::File,
            opened: true,
            tuples: Vec::new(),
            current: TupleLexer::new(TupleKind::File),
        }
    }

    /// A `{`/`(` group; the bracket itself arrives via `advance`.
    fn bracketed(kind: TupleKind) -> Self {
        Self {
            kind,
            opened: false,
            tuples: Vec::new(),
            current: TupleLexer::new(kind),
        }
    }

    /// Finishes the current tuple and starts a fresh one of the same mode.
    fn split(&mut self) {
        let tuple = mem::replace(&mut self.current, TupleLexer::new(self.kind)).into_tuple();
        if !tuple.is_empty() {
            self.tuples.push(tuple);
        }
    }

    fn advance(&mut self, c: char) -> Result<Step, ParseError> {
        if !self.opened {
            // The dispatcher already classified this character as our
            // opening bracket.
            self.opened = true;
            return Ok(Step::Continue);
        }
        match self.current.advance(c)? {
            Step::Continue => Ok(Step::Continue),
            Step::Complete => {
                self.split();
                Ok(Step::Continue)
            }
            Step::Reject(rejected) => {
                self.split();
                if Some(rejected) == self.kind.terminator() {
                    // The terminator is consumed and completes the set.
                    Ok(Step::Complete)
                } else {
                    Ok(Step::Reject(rejected))
                }
            }
        }
    }

    fn into_set(self) -> TupleSet {
        TupleSet::new(self.kind, self.tuples)
    }

    fn finish(mut self) -> Result<TupleSet, ParseError> {
        let current = mem::replace(&mut self.current, TupleLexer::new(self.kind));
        match self.kind.terminator() {
            // File mode: completion at end of input is implicit.
            None => {
                let tuple = current.finish()?;
                if !tuple.is_empty() {
                    self.tuples.push(tuple);
                }
                Ok(self.into_set())
            }
            Some(terminator) => {
                // Report the innermost failure first: an unterminated
                // string inside the group beats the missing bracket.
                current.finish()?;
                Err(ParseError::UnterminatedGroup {
                    kind: self.kind,
                    terminator,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(source: &str) -> TupleSet {
        parse_document(source).expect("document should parse")
    }

    /// The values of the only tuple in a document.
    fn values(source: &str) -> Vec<Node> {
        let mut set = doc(source);
        assert_eq!(set.tuples.len(), 1, "expected one tuple in {source:?}");
        set.tuples.remove(0).values
    }

    #[test]
    fn single_atoms_by_character_class() {
        assert_eq!(values("blah"), vec![Node::bare_word("blah")]);
        assert_eq!(values("1234"), vec![Node::number("1234")]);
        assert_eq!(values("=="), vec![Node::symbolic("==")]);
        assert_eq!(values("$x"), vec![Node::reference('$', "x")]);
        assert_eq!(values("@x"), vec![Node::reference('@', "x")]);
        assert_eq!(values("'hi'"), vec![Node::string("'", "hi")]);
    }

    #[test]
    fn whitespace_separates_values() {
        assert_eq!(
            values("blah  blorp\twut"),
            vec![
                Node::bare_word("blah"),
                Node::bare_word("blorp"),
                Node::bare_word("wut"),
            ]
        );
    }

    #[test]
    fn adjacent_atoms_split_on_class_transition() {
        assert_eq!(
            values("abc+def"),
            vec![
                Node::bare_word("abc"),
                Node::symbolic("+"),
                Node::bare_word("def"),
            ]
        );
        assert_eq!(
            values("abc'str'"),
            vec![Node::bare_word("abc"), Node::string("'", "str")]
        );
    }

    #[test]
    fn label_takes_only_the_value_to_its_left() {
        assert_eq!(
            values("blah blorp: what wut"),
            vec![
                Node::bare_word("blah"),
                Node::label(Node::bare_word("blorp"), Node::bare_word("what")),
                Node::bare_word("wut"),
            ]
        );
    }

    #[test]
    fn label_swallows_whitespace_before_its_value() {
        assert_eq!(
            values("k: \n  v"),
            vec![Node::label(Node::bare_word("k"), Node::bare_word("v"))]
        );
    }

    #[test]
    fn label_key_may_itself_be_a_label() {
        assert_eq!(
            values("a: b: c"),
            vec![Node::label(
                Node::label(Node::bare_word("a"), Node::bare_word("b")),
                Node::bare_word("c"),
            )]
        );
    }

    #[test]
    fn empty_sets() {
        assert_eq!(
            values("{}"),
            vec![Node::TupleSet(TupleSet::new(TupleKind::Line, vec![]))]
        );
        assert_eq!(
            values("()"),
            vec![Node::TupleSet(TupleSet::new(TupleKind::Comma, vec![]))]
        );
    }

    #[test]
    fn comma_set_splits_on_commas() {
        assert_eq!(
            values("(a 1, b)"),
            vec![Node::TupleSet(TupleSet::new(
                TupleKind::Comma,
                vec![
                    Tuple::new(
                        TupleKind::Comma,
                        vec![Node::bare_word("a"), Node::number("1")],
                    ),
                    Tuple::new(TupleKind::Comma, vec![Node::bare_word("b")]),
                ],
            ))]
        );
    }

    #[test]
    fn line_set_splits_on_newlines_and_drops_empty_rows() {
        assert_eq!(
            values("{a\n\n b c\n}"),
            vec![Node::TupleSet(TupleSet::new(
                TupleKind::Line,
                vec![
                    Tuple::new(TupleKind::Line, vec![Node::bare_word("a")]),
                    Tuple::new(
                        TupleKind::Line,
                        vec![Node::bare_word("b"), Node::bare_word("c")],
                    ),
                ],
            ))]
        );
    }

    #[test]
    fn sets_nest() {
        assert_eq!(
            values("({a}, ())"),
            vec![Node::TupleSet(TupleSet::new(
                TupleKind::Comma,
                vec![
                    Tuple::new(
                        TupleKind::Comma,
                        vec![Node::TupleSet(TupleSet::new(
                            TupleKind::Line,
                            vec![Tuple::new(TupleKind::Line, vec![Node::bare_word("a")])],
                        ))],
                    ),
                    Tuple::new(
                        TupleKind::Comma,
                        vec![Node::TupleSet(TupleSet::new(TupleKind::Comma, vec![]))],
                    ),
                ],
            ))]
        );
    }

    #[test]
    fn file_splits_tuples_on_newlines() {
        let set = doc("a b\nc\n\nd");
        assert_eq!(set.kind, TupleKind::File);
        assert_eq!(set.tuples.len(), 3);
        assert_eq!(
            set.tuples[0].values,
            vec![Node::bare_word("a"), Node::bare_word("b")]
        );
        assert_eq!(set.tuples[1].values, vec![Node::bare_word("c")]);
        assert_eq!(set.tuples[2].values, vec![Node::bare_word("d")]);
    }

    #[test]
    fn empty_document_has_no_tuples() {
        assert!(doc("").tuples.is_empty());
        assert!(doc("  \n \t \n").tuples.is_empty());
    }

    #[test]
    fn line_comments_are_tree_values() {
        assert_eq!(
            values("a # to end of line"),
            vec![
                Node::bare_word("a"),
                Node::string("# ", "to end of line"),
            ]
        );
        assert_eq!(values("## note"), vec![Node::string("##", " note")]);
    }

    #[test]
    fn unbalanced_groups_fail() {
        assert_eq!(
            parse_document("{a b"),
            Err(ParseError::UnterminatedGroup {
                kind: TupleKind::Line,
                terminator: '}',
            })
        );
        assert_eq!(
            parse_document("(a b"),
            Err(ParseError::UnterminatedGroup {
                kind: TupleKind::Comma,
                terminator: ')',
            })
        );
        // The innermost problem wins.
        assert_eq!(
            parse_document("{'oops"),
            Err(ParseError::UnterminatedString { terminator: '\'' })
        );
    }

    #[test]
    fn stray_closers_are_rejected() {
        assert_eq!(
            parse_document("a )"),
            Err(ParseError::UnexpectedCharacter(')'))
        );
        assert_eq!(
            parse_document("a ]"),
            Err(ParseError::UnexpectedCharacter(']'))
        );
        assert_eq!(
            parse_document("(a }"),
            Err(ParseError::UnexpectedCharacter('}'))
        );
    }

    #[test]
    fn label_errors() {
        assert_eq!(parse_document(": x"), Err(ParseError::LabelWithoutKey));
        assert_eq!(parse_document("k:"), Err(ParseError::LabelWithoutValue));
        assert_eq!(parse_document("k: \n"), Err(ParseError::LabelWithoutValue));
        // A character no value can start from, in label-value position.
        assert_eq!(
            parse_document("k: )"),
            Err(ParseError::UnexpectedCharacter(')'))
        );
    }

    #[test]
    fn unterminated_string_at_file_level() {
        assert_eq!(
            parse_document("\"blah"),
            Err(ParseError::UnterminatedString { terminator: '"' })
        );
    }
}
