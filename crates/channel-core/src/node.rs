// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! Parse-tree node definitions for Channel documents.
//!
//! Everything the parser produces is a [`Node`]. The tree is untyped and
//! purely structural: two nodes are equal iff they are the same variant
//! with the same field values. Nodes are immutable once built and owned
//! exclusively by their parent container, so a finished tree can be shared
//! read-only across threads.
//!
//! # Example
//!
//! ```
//! use channel_core::node::Node;
//! use channel_core::parse::parse_document;
//!
//! let doc = parse_document("blah blorp: what").unwrap();
//! assert_eq!(doc.tuples[0].values[0], Node::bare_word("blah"));
//! ```

use std::fmt;

use ecow::EcoString;

/// The splitter/terminator mode of a [`Tuple`] or [`TupleSet`].
///
/// The mode is fixed permanently when the container is created:
///
/// | Kind | Splitter | Terminator |
/// |-------|----------|----------------|
/// | File | `\n` | end of input |
/// | Line | `\n` | `}` |
/// | Comma | `,` | `)` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TupleKind {
    /// A whole document; terminated only by end of input.
    File,
    /// A `{ ... }` group of newline-separated tuples.
    Line,
    /// A `( ... )` group of comma-separated tuples.
    Comma,
}

impl TupleKind {
    /// The character that ends one tuple and starts the next.
    #[must_use]
    pub const fn splitter(self) -> char {
        match self {
            Self::File | Self::Line => '\n',
            Self::Comma => ',',
        }
    }

    /// The character that ends the whole set, if any.
    ///
    /// `File` sets have no terminator; they end at end of input.
    #[must_use]
    pub const fn terminator(self) -> Option<char> {
        match self {
            Self::File => None,
            Self::Line => Some('}'),
            Self::Comma => Some(')'),
        }
    }
}

/// One row of whitespace-separated values.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    /// The mode inherited from the enclosing set.
    pub kind: TupleKind,
    /// The values, in source order.
    pub values: Vec<Node>,
}

impl Tuple {
    /// Creates a tuple from its values.
    #[must_use]
    pub fn new(kind: TupleKind, values: Vec<Node>) -> Self {
        Self { kind, values }
    }

    /// Returns true if the tuple holds no values.
    ///
    /// Empty tuples are dropped by the parser and never appear in a
    /// finished [`TupleSet`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered collection of tuples sharing one splitter/terminator mode.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleSet {
    /// The mode of this set and every tuple in it.
    pub kind: TupleKind,
    /// The non-empty tuples, in source order.
    pub tuples: Vec<Tuple>,
}

impl TupleSet {
    /// Creates a set from its tuples.
    #[must_use]
    pub fn new(kind: TupleKind, tuples: Vec<Tuple>) -> Self {
        Self { kind, tuples }
    }

    /// Returns true if the set holds no tuples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }
}

/// A node in the generic parse tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An identifier-like token: a maximal run of `[A-Za-z0-9_]`.
    BareWord(EcoString),

    /// A digit sequence with at most one decimal point.
    Number(EcoString),

    /// A maximal run of symbol-class characters.
    Symbolic(EcoString),

    /// A variable reference: `$name` or `@name`.
    Reference {
        /// `'$'` or `'@'`.
        sigil: char,
        /// The referenced name.
        name: EcoString,
    },

    /// Quoted or custom-delimited text.
    ///
    /// The delimiter is the opening text as written: `'`, `"`, or a
    /// two-character `#`-prefixed tag such as `#[` or `#|`. Line comments
    /// keep their `# ` / `##` opener and are ordinary tree values.
    StringConstant {
        /// The opening delimiter.
        delimiter: EcoString,
        /// The text between the delimiters, with escapes resolved.
        body: EcoString,
    },

    /// A `key: value` pair.
    Label {
        /// The value immediately preceding the `:`.
        key: Box<Node>,
        /// The value following the `:`.
        value: Box<Node>,
    },

    /// One row of values.
    Tuple(Tuple),

    /// A bracketed or file-level group of rows.
    TupleSet(TupleSet),
}

impl Node {
    /// Creates a [`Node::BareWord`].
    #[must_use]
    pub fn bare_word(text: impl Into<EcoString>) -> Self {
        Self::BareWord(text.into())
    }

    /// Creates a [`Node::Number`].
    #[must_use]
    pub fn number(text: impl Into<EcoString>) -> Self {
        Self::Number(text.into())
    }

    /// Creates a [`Node::Symbolic`].
    #[must_use]
    pub fn symbolic(text: impl Into<EcoString>) -> Self {
        Self::Symbolic(text.into())
    }

    /// Creates a [`Node::Reference`].
    #[must_use]
    pub fn reference(sigil: char, name: impl Into<EcoString>) -> Self {
        Self::Reference {
            sigil,
            name: name.into(),
        }
    }

    /// Creates a [`Node::StringConstant`].
    #[must_use]
    pub fn string(delimiter: impl Into<EcoString>, body: impl Into<EcoString>) -> Self {
        Self::StringConstant {
            delimiter: delimiter.into(),
            body: body.into(),
        }
    }

    /// Creates a [`Node::Label`].
    #[must_use]
    pub fn label(key: Node, value: Node) -> Self {
        Self::Label {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Returns the token text of an unquoted atom, if this is one.
    #[must_use]
    pub fn atom_text(&self) -> Option<&EcoString> {
        match self {
            Self::BareWord(text) | Self::Number(text) | Self::Symbolic(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true for the node kinds that can head a call term:
    /// bare words and symbolics.
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::BareWord(_) | Self::Symbolic(_))
    }
}

/// Maps an opening bracket to its closing partner; other characters map
/// to themselves. Shared by the string lexer and the display code.
#[must_use]
pub(crate) const fn closing_delimiter(open: char) -> char {
    match open {
        '{' => '}',
        '(' => ')',
        '[' => ']',
        other => other,
    }
}

// Rendering is source-shaped but lossy (whitespace is normalised and string
// escapes are not reintroduced). It exists so diagnostics can show the
// offending node; it is not a pretty-printer.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BareWord(text) | Self::Number(text) | Self::Symbolic(text) => {
                write!(f, "{text}")
            }
            Self::Reference { sigil, name } => write!(f, "{sigil}{name}"),
            Self::StringConstant { delimiter, body } => {
                let close = delimiter
                    .chars()
                    .last()
                    .map_or('"', closing_delimiter);
                write!(f, "{delimiter}{body}{close}")
            }
            Self::Label { key, value } => write!(f, "{key}: {value}"),
            Self::Tuple(tuple) => write!(f, "{tuple}"),
            Self::TupleSet(set) => write!(f, "{set}"),
        }
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TupleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = match self.kind {
            TupleKind::File => ("", ""),
            TupleKind::Line => ("{", "}"),
            TupleKind::Comma => ("(", ")"),
        };
        f.write_str(open)?;
        for (i, tuple) in self.tuples.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.kind.splitter())?;
            }
            write!(f, "{tuple}")?;
        }
        f.write_str(close)
    }
}
