// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! Atom lexers: the smallest state machines in the parser.
//!
//! Each lexer consumes one character at a time through [`Step`]-returning
//! `advance` calls. A lexer recognises exactly one atomic node — a bare
//! word, a symbolic run, a number, a reference, or a string constant — and
//! signals how each character relates to it:
//!
//! - [`Step::Continue`] — the character was consumed, keep feeding.
//! - [`Step::Reject`] — the character is not part of this token; the node
//!   is finished and the caller must re-dispatch that exact character at
//!   its own level, exactly once.
//! - [`Step::Complete`] — the lexer consumed its own terminator (for
//!   example a closing quote) and the node is finished.
//!
//! End of input is signalled separately through `finish`, which either
//! yields the node lexed so far or a [`ParseError`] for lexers that still
//! required a terminator.

use ecow::EcoString;

use super::error::ParseError;
use crate::node::{closing_delimiter, Node};

/// The outcome of feeding one character to a lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Character consumed; the lexer wants more input.
    Continue,
    /// Character refused; the node is finished and the character must be
    /// re-dispatched by the caller.
    Reject(char),
    /// The lexer consumed its own terminator; the node is finished.
    Complete,
}

/// The two disjoint character classes of unquoted atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// ASCII alphanumeric or `_`.
    Word,
    /// Anything else that is not whitespace and not a terminator.
    Symbol,
}

/// Whitespace as the tuple assembler understands it.
pub(crate) const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Characters that always end an unquoted atom, whatever its class.
pub(crate) const fn is_atom_terminator(c: char) -> bool {
    is_whitespace(c)
        || matches!(
            c,
            '{' | '}' | '(' | ')' | '[' | ']' | ',' | '"' | '\'' | '$' | '@' | ':' | '#'
        )
}

pub(crate) const fn char_class(c: char) -> CharClass {
    if c.is_ascii_alphanumeric() || c == '_' {
        CharClass::Word
    } else {
        CharClass::Symbol
    }
}

/// Lexes a [`Node::BareWord`] or [`Node::Symbolic`].
///
/// The character class is locked by the first character; a class
/// transition ends the token just like a terminator does.
#[derive(Debug)]
pub(crate) struct WordLexer {
    class: Option<CharClass>,
    text: EcoString,
}

impl WordLexer {
    pub(crate) fn new() -> Self {
        Self {
            class: None,
            text: EcoString::new(),
        }
    }

    pub(crate) fn advance(&mut self, c: char) -> Step {
        if is_atom_terminator(c) {
            return Step::Reject(c);
        }
        let class = char_class(c);
        match self.class {
            None => self.class = Some(class),
            Some(locked) if locked != class => return Step::Reject(c),
            Some(_) => {}
        }
        self.text.push(c);
        Step::Continue
    }

    pub(crate) fn into_node(self) -> Node {
        match self.class {
            Some(CharClass::Symbol) => Node::Symbolic(self.text),
            _ => Node::BareWord(self.text),
        }
    }
}

/// Lexes a [`Node::Number`]: digits with at most one decimal point.
#[derive(Debug)]
pub(crate) struct NumberLexer {
    text: EcoString,
    seen_point: bool,
}

impl NumberLexer {
    pub(crate) fn new() -> Self {
        Self {
            text: EcoString::new(),
            seen_point: false,
        }
    }

    pub(crate) fn advance(&mut self, c: char) -> Step {
        match c {
            '0'..='9' => {
                self.text.push(c);
                Step::Continue
            }
            '.' if !self.seen_point => {
                self.seen_point = true;
                self.text.push(c);
                Step::Continue
            }
            other => Step::Reject(other),
        }
    }

    pub(crate) fn into_node(self) -> Node {
        Node::Number(self.text)
    }
}

/// Lexes a [`Node::Reference`]: a `$` or `@` sigil followed by a name.
#[derive(Debug)]
pub(crate) struct ReferenceLexer {
    sigil: Option<char>,
    name: EcoString,
}

impl ReferenceLexer {
    pub(crate) fn new() -> Self {
        Self {
            sigil: None,
            name: EcoString::new(),
        }
    }

    pub(crate) fn advance(&mut self, c: char) -> Step {
        if self.sigil.is_none() {
            self.sigil = Some(c);
            return Step::Continue;
        }
        if c.is_ascii_alphanumeric() || c == '_' {
            self.name.push(c);
            Step::Continue
        } else {
            Step::Reject(c)
        }
    }

    pub(crate) fn into_node(self) -> Node {
        Node::Reference {
            sigil: self.sigil.unwrap_or('$'),
            name: self.name,
        }
    }
}

/// Lexes a [`Node::StringConstant`].
///
/// The terminator is resolved from the opening delimiter:
///
/// - `'` and `"` terminate on the same character;
/// - `# ` and `##` open a line comment terminated by `\n`;
/// - any other `#x` terminates on the bracket partner of `x`, or on `x`
///   itself when it is not a bracket.
///
/// A backslash escapes the very next character only when that character is
/// the terminator; otherwise both the backslash and the character pass
/// through untouched.
#[derive(Debug)]
pub(crate) struct StringLexer {
    delimiter: EcoString,
    terminator: Option<char>,
    body: EcoString,
    escape: bool,
}

impl StringLexer {
    pub(crate) fn new() -> Self {
        Self {
            delimiter: EcoString::new(),
            terminator: None,
            body: EcoString::new(),
            escape: false,
        }
    }

    pub(crate) fn advance(&mut self, c: char) -> Step {
        // First character: the opening quote or `#`.
        if self.delimiter.is_empty() {
            self.delimiter.push(c);
            if c != '#' {
                self.terminator = Some(c);
            }
            return Step::Continue;
        }

        // `#` alone is incomplete; the next character picks the subtype.
        if self.terminator.is_none() {
            self.delimiter.push(c);
            self.terminator = Some(match c {
                ' ' | '#' => '\n',
                other => closing_delimiter(other),
            });
            return Step::Continue;
        }

        if self.escape {
            self.escape = false;
            if Some(c) != self.terminator {
                self.body.push('\\');
            }
            self.body.push(c);
            return Step::Continue;
        }

        match c {
            '\\' => {
                self.escape = true;
                Step::Continue
            }
            c if Some(c) == self.terminator => Step::Complete,
            c => {
                self.body.push(c);
                Step::Continue
            }
        }
    }

    /// End of input. A line comment completes (end of input acts as its
    /// newline); everything else still owed a terminator is an error.
    pub(crate) fn finish(self) -> Result<Node, ParseError> {
        match self.terminator {
            Some('\n') => Ok(self.into_node()),
            Some(terminator) => Err(ParseError::UnterminatedString { terminator }),
            None => Err(ParseError::UnresolvedDelimiter { opening: '#' }),
        }
    }

    pub(crate) fn into_node(self) -> Node {
        Node::StringConstant {
            delimiter: self.delimiter,
            body: self.body,
        }
    }
}
