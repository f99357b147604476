// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! Structural parse errors.
//!
//! The parser has exactly one failure mode: the input stream ends (or
//! presents a character) in a place the current node cannot accept, and
//! there is no recovery. The partial tree is discarded and the error is
//! surfaced to the caller. Line/column tracking is layered on by the
//! surrounding tooling, not here.

use miette::Diagnostic;
use thiserror::Error;

use crate::node::TupleKind;

/// A structural error raised while parsing a document.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// A `{`/`(` group reached end of input without its `}`/`)`.
    #[error("unterminated {kind:?} group: expected '{terminator}' before end of input")]
    UnterminatedGroup {
        /// The mode of the unterminated group.
        kind: TupleKind,
        /// The terminator that never arrived.
        terminator: char,
    },

    /// A string constant reached end of input before its terminator.
    #[error("unterminated string constant: expected '{terminator}' before end of input")]
    UnterminatedString {
        /// The terminator resolved from the opening delimiter.
        terminator: char,
    },

    /// A `#`-delimited string ended before its delimiter was resolved.
    #[error("string delimiter '{opening}' is incomplete at end of input")]
    UnresolvedDelimiter {
        /// The opening text seen so far.
        opening: char,
    },

    /// A `:` arrived with no value before it to use as the label key.
    #[error("label ':' has no value to its left to use as a key")]
    LabelWithoutKey,

    /// A label's `:` was never followed by a value.
    #[error("label is missing its value at end of input")]
    LabelWithoutValue,

    /// A character that no node can start or continue, such as a stray
    /// closing bracket.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
}
