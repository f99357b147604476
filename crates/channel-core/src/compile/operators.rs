// Copyright 2026 The Channel Authors
// SPDX-License-Identifier: Apache-2.0

//! The operator table.
//!
//! One static table, fixed at compile time; the parser's reordering pass
//! looks tokens up here and nowhere else. Precedence is expressed as a
//! binding power: **higher binds tighter**. Unary operators share one
//! level just below member access and are right-associative; every binary
//! level is left-associative.
//!
//! | Power | Operators | Arity |
//! |-------|--------------------|-------|
//! | 130 | `.` | 2 |
//! | 120 | `+ - ! ~ *` | 1 |
//! | 110 | `* / %` | 2 |
//! | 100 | `+ -` | 2 |
//! | 90 | `.. ...` | 2 |
//! | 80 | `<< >>` | 2 |
//! | 70 | `< > <= >=` | 2 |
//! | 60 | `== !=` | 2 |
//! | 50 | `&` | 2 |
//! | 40 | `^` | 2 |
//! | 30 | `\|` | 2 |
//! | 20 | `&&` | 2 |
//! | 10 | `\|\|` | 2 |

/// Operand grouping direction for operators at equal binding power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// Groups left to right: `a - b - c` is `(a - b) - c`.
    LeftToRight,
    /// Groups right to left: `!!a` is `!(!a)`.
    RightToLeft,
}

/// One entry in the operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    /// The operator token as written in source.
    pub token: &'static str,
    /// Number of operands: 1 for prefix forms, 2 for infix.
    pub arity: u8,
    /// Binding power; higher binds tighter.
    pub precedence: u8,
    /// Grouping direction at equal binding power.
    pub associativity: Associativity,
}

impl Operator {
    const fn unary(token: &'static str) -> Self {
        Self {
            token,
            arity: 1,
            precedence: 120,
            associativity: Associativity::RightToLeft,
        }
    }

    const fn binary(token: &'static str, precedence: u8) -> Self {
        Self {
            token,
            arity: 2,
            precedence,
            associativity: Associativity::LeftToRight,
        }
    }
}

/// Looks up a token in unary (prefix) position.
#[must_use]
pub fn unary_operator(token: &str) -> Option<Operator> {
    match token {
        "+" => Some(Operator::unary("+")),
        "-" => Some(Operator::unary("-")),
        "!" => Some(Operator::unary("!")),
        "~" => Some(Operator::unary("~")),
        "*" => Some(Operator::unary("*")),
        _ => None,
    }
}

/// Looks up a token in binary (infix) position.
#[must_use]
pub fn binary_operator(token: &str) -> Option<Operator> {
    let operator = match token {
        "." => Operator::binary(".", 130),

        "*" => Operator::binary("*", 110),
        "/" => Operator::binary("/", 110),
        "%" => Operator::binary("%", 110),

        "+" => Operator::binary("+", 100),
        "-" => Operator::binary("-", 100),

        ".." => Operator::binary("..", 90),
        "..." => Operator::binary("...", 90),

        "<<" => Operator::binary("<<", 80),
        ">>" => Operator::binary(">>", 80),

        "<" => Operator::binary("<", 70),
        ">" => Operator::binary(">", 70),
        "<=" => Operator::binary("<=", 70),
        ">=" => Operator::binary(">=", 70),

        "==" => Operator::binary("==", 60),
        "!=" => Operator::binary("!=", 60),

        "&" => Operator::binary("&", 50),
        "^" => Operator::binary("^", 40),
        "|" => Operator::binary("|", 30),
        "&&" => Operator::binary("&&", 20),
        "||" => Operator::binary("||", 10),

        _ => return None,
    };
    Some(operator)
}

/// The desugaring target for `switch`: one equality test per branch.
#[must_use]
pub(crate) fn equality() -> Operator {
    Operator::binary("==", 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_and_binary_tables_are_disjoint_by_position() {
        // `*` exists in both tables with different arity.
        assert_eq!(unary_operator("*").map(|op| op.arity), Some(1));
        assert_eq!(binary_operator("*").map(|op| op.arity), Some(2));
        // `!` is prefix-only, `/` infix-only.
        assert!(unary_operator("!").is_some());
        assert!(binary_operator("!").is_none());
        assert!(unary_operator("/").is_none());
        assert!(binary_operator("/").is_some());
    }

    #[test]
    fn unary_binds_tighter_than_any_binary_except_member_access() {
        let bang = unary_operator("!").unwrap();
        let dot = binary_operator(".").unwrap();
        let star = binary_operator("*").unwrap();
        assert!(dot.precedence > bang.precedence);
        assert!(bang.precedence > star.precedence);
    }

    #[test]
    fn binary_levels_order() {
        let order = ["*", "+", "..", "<<", "<", "==", "&", "^", "|", "&&", "||"];
        for pair in order.windows(2) {
            let tighter = binary_operator(pair[0]).unwrap();
            let looser = binary_operator(pair[1]).unwrap();
            assert!(
                tighter.precedence > looser.precedence,
                "{} should bind tighter than {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn unknown_tokens_are_not_operators() {
        assert!(binary_operator("=").is_none());
        assert!(binary_operator("and").is_none());
        assert!(unary_operator("..").is_none());
    }
}
