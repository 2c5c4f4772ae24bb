// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parser for Boolean expressions, generated from `grammar.lalrpop`.
//!
//! Precedence from lowest to highest is `|`, `&`, prefix `!`/`~`, then parentheses and atoms.
//! Binary operators are left-associative. Words (runs of letters, digits and `_`) are lexed as a
//! unit, so `AB` or `G1` are rejected whole as unknown variables.

use super::Expr;
use crate::{
    errors::{SyntaxError, SyntaxErrorKind},
    variable::Variable,
};
use lalrpop_util::{lexer::Token, ParseError};

#[allow(clippy::all)]
mod grammar {
    #![allow(dead_code)]
    #![allow(unused_imports)]
    #![allow(unused_variables)]
    #![allow(non_snake_case)]
    #![allow(non_camel_case_types)]
    #![allow(non_upper_case_globals)]
    include!(concat!(env!("OUT_DIR"), "/expr/grammar.rs"));
}

/// Deepest operator nesting accepted. Evaluating, printing and dropping an [`Expr`] recurse
/// once per level.
pub const MAX_DEPTH: usize = 256;

const END_OF_INPUT: &str = "end of input";

pub(super) fn parse(input: &str) -> Result<Expr, SyntaxError> {
    if input.trim().is_empty() {
        return Err(SyntaxError::new(0, SyntaxErrorKind::Empty));
    }
    grammar::DisjunctionParser::new()
        .parse(input)
        .map(|parsed| parsed.expr)
        .map_err(|err| convert_error(input, err))
}

type ActionResult<T> = Result<Parsed, ParseError<usize, T, SyntaxError>>;

/// A subtree together with the number of operators on its longest path.
pub struct Parsed {
    expr: Expr,
    depth: usize,
}

impl Parsed {
    fn leaf(expr: Expr) -> Self {
        Self { expr, depth: 0 }
    }

    fn nest<T>(op: usize, depth: usize, expr: Expr) -> ActionResult<T> {
        if depth > MAX_DEPTH {
            return Err(ParseError::User {
                error: SyntaxError::new(op, SyntaxErrorKind::TooDeep { limit: MAX_DEPTH }),
            });
        }
        Ok(Self { expr, depth })
    }

    pub fn not<T>(op: usize, inner: Parsed) -> ActionResult<T> {
        Self::nest(op, inner.depth + 1, Expr::Not(Box::new(inner.expr)))
    }

    pub fn and<T>(op: usize, lhs: Parsed, rhs: Parsed) -> ActionResult<T> {
        let depth = lhs.depth.max(rhs.depth) + 1;
        Self::nest(op, depth, Expr::And(Box::new(lhs.expr), Box::new(rhs.expr)))
    }

    pub fn or<T>(op: usize, lhs: Parsed, rhs: Parsed) -> ActionResult<T> {
        let depth = lhs.depth.max(rhs.depth) + 1;
        Self::nest(op, depth, Expr::Or(Box::new(lhs.expr), Box::new(rhs.expr)))
    }
}

/// Resolves a word to a variable or constant.
pub fn word<T>(text: &str, position: usize) -> ActionResult<T> {
    classify(text, position)
        .map(Parsed::leaf)
        .map_err(|error| ParseError::User { error })
}

fn classify(text: &str, position: usize) -> Result<Expr, SyntaxError> {
    if text == "1" || text.eq_ignore_ascii_case("true") {
        return Ok(Expr::Const(true));
    }
    if text == "0" || text.eq_ignore_ascii_case("false") {
        return Ok(Expr::Const(false));
    }

    let mut chars = text.chars();
    match (chars.next().and_then(Variable::from_name), chars.next()) {
        (Some(var), None) => Ok(Expr::Var(var)),
        _ => Err(SyntaxError::new(
            position,
            SyntaxErrorKind::UnknownVariable(text.to_owned()),
        )),
    }
}

fn is_word(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// How a token is named in error messages.
fn describe(text: &str) -> String {
    match classify(text, 0) {
        Ok(Expr::Var(var)) => format!("variable {}", var),
        Ok(Expr::Const(value)) => format!("constant {}", value),
        _ => format!("'{}'", text),
    }
}

// Expected terminals are reported quoted, as in `"("`.
fn expects(expected: &[String], terminal: &str) -> bool {
    expected.iter().any(|e| e.trim_matches('"') == terminal)
}

fn innermost_unclosed(input: &str) -> Option<usize> {
    let mut open = Vec::new();
    for (ix, ch) in input.char_indices() {
        match ch {
            '(' => open.push(ix),
            ')' => {
                open.pop();
            }
            _ => {}
        }
    }
    open.pop()
}

fn convert_error(input: &str, err: ParseError<usize, Token<'_>, SyntaxError>) -> SyntaxError {
    match err {
        ParseError::InvalidToken { location } => {
            let kind = match input.get(location..).and_then(|rest| rest.chars().next()) {
                Some(ch) => SyntaxErrorKind::UnexpectedChar(ch),
                None => SyntaxErrorKind::MissingOperand(END_OF_INPUT.to_owned()),
            };
            SyntaxError::new(location, kind)
        }
        ParseError::UnrecognizedEof { location, expected } => match innermost_unclosed(input) {
            Some(open) if expects(&expected, ")") => {
                SyntaxError::new(open, SyntaxErrorKind::UnclosedParen)
            }
            _ => SyntaxError::new(
                location,
                SyntaxErrorKind::MissingOperand(END_OF_INPUT.to_owned()),
            ),
        },
        ParseError::UnrecognizedToken {
            token: (start, Token(_, text), _),
            expected,
        } => {
            if is_word(text) {
                if let Err(err) = classify(text, start) {
                    return err;
                }
            }
            let kind = if expects(&expected, "(") {
                SyntaxErrorKind::MissingOperand(describe(text))
            } else if text == ")" {
                SyntaxErrorKind::UnmatchedParen
            } else {
                SyntaxErrorKind::TrailingInput(describe(text))
            };
            SyntaxError::new(start, kind)
        }
        ParseError::ExtraToken {
            token: (start, Token(_, text), _),
        } => SyntaxError::new(start, SyntaxErrorKind::TrailingInput(describe(text))),
        ParseError::User { error } => error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn var(name: char) -> Box<Expr> {
        Box::new(Expr::Var(Variable::from_name(name).unwrap()))
    }

    fn syntax_error(input: &str) -> SyntaxError {
        parse(input).expect_err("input is invalid")
    }

    #[test]
    fn test_precedence() {
        // | binds loosest, then &, then !
        assert_eq!(
            parse("A | B & !C").unwrap(),
            Expr::Or(var('A'), Box::new(Expr::And(var('B'), Box::new(Expr::Not(var('C'))))))
        );
        assert_eq!(
            parse("(A | B) & ~C").unwrap(),
            Expr::And(
                Box::new(Expr::Or(var('A'), var('B'))),
                Box::new(Expr::Not(var('C')))
            )
        );
        // Left associative.
        assert_eq!(
            parse("A&B&C").unwrap(),
            Expr::And(Box::new(Expr::And(var('A'), var('B'))), var('C'))
        );
        assert_eq!(parse("!!A").unwrap(), Expr::Not(Box::new(Expr::Not(var('A')))));
    }

    #[test]
    fn test_constants() {
        assert_eq!(parse("true").unwrap(), Expr::Const(true));
        assert_eq!(parse(" FALSE ").unwrap(), Expr::Const(false));
        assert_eq!(
            parse("1 & A").unwrap(),
            Expr::And(Box::new(Expr::Const(true)), var('A'))
        );
        assert_eq!(parse("(0)").unwrap(), Expr::Const(false));
    }

    #[test]
    fn test_errors() {
        assert_eq!(syntax_error(""), SyntaxError::new(0, SyntaxErrorKind::Empty));
        assert_eq!(syntax_error("   "), SyntaxError::new(0, SyntaxErrorKind::Empty));
        assert_eq!(
            syntax_error("A & (B | !C"),
            SyntaxError::new(4, SyntaxErrorKind::UnclosedParen)
        );
        assert_eq!(
            syntax_error("A & B)"),
            SyntaxError::new(5, SyntaxErrorKind::UnmatchedParen)
        );
        assert_eq!(
            syntax_error("A & & B"),
            SyntaxError::new(4, SyntaxErrorKind::MissingOperand("'&'".to_owned()))
        );
        assert_eq!(
            syntax_error("A |"),
            SyntaxError::new(3, SyntaxErrorKind::MissingOperand("end of input".to_owned()))
        );
        assert_eq!(
            syntax_error("G & A"),
            SyntaxError::new(0, SyntaxErrorKind::UnknownVariable("G".to_owned()))
        );
        assert_eq!(
            syntax_error("A & ab"),
            SyntaxError::new(4, SyntaxErrorKind::UnknownVariable("ab".to_owned()))
        );
        assert_eq!(
            syntax_error("A B"),
            SyntaxError::new(2, SyntaxErrorKind::TrailingInput("variable B".to_owned()))
        );
        assert_eq!(
            syntax_error("A + B"),
            SyntaxError::new(2, SyntaxErrorKind::UnexpectedChar('+'))
        );
        assert_eq!(
            syntax_error("()"),
            SyntaxError::new(1, SyntaxErrorKind::MissingOperand("')'".to_owned()))
        );
    }

    #[test]
    fn test_depth_limit() {
        let too_deep = SyntaxErrorKind::TooDeep { limit: MAX_DEPTH };

        let nots = format!("{}A", "!".repeat(MAX_DEPTH));
        assert_eq!(parse(&nots).unwrap().to_string(), format!("{}A", "~".repeat(MAX_DEPTH)));
        let nots = format!("{}A", "!".repeat(MAX_DEPTH + 1));
        assert_eq!(syntax_error(&nots), SyntaxError::new(0, too_deep.clone()));

        // The innermost operator past the limit is reported.
        let count = 500_000;
        let nots = format!("{}A", "~".repeat(count));
        assert_eq!(
            syntax_error(&nots),
            SyntaxError::new(count - MAX_DEPTH - 1, too_deep.clone())
        );

        // Parentheses alone add no operators.
        for count in [2_000, 30_000] {
            let parens = format!("{}A{}", "(".repeat(count), ")".repeat(count));
            assert_eq!(parse(&parens).unwrap(), Expr::Var(Variable::A));
            let parens = format!("{}!A{}", "(!".repeat(count), ")".repeat(count));
            assert_eq!(syntax_error(&parens).kind, too_deep);
        }

        // Every `&` in a left-associative chain adds a level. The 257th sits at byte 4 * 256 + 2.
        let chain = vec!["A"; MAX_DEPTH + 2].join(" & ");
        assert_eq!(
            syntax_error(&chain),
            SyntaxError::new(4 * MAX_DEPTH + 2, too_deep)
        );
        let chain = vec!["A"; MAX_DEPTH + 1].join(" | ");
        assert!(parse(&chain).is_ok());
    }

    proptest! {
        #[test]
        fn proptest_never_panics(input in "[A-H01!~&|() xé]{0,24}") {
            // Either a tree that prints and parses back to itself, or an error inside the input.
            match parse(&input) {
                Ok(expr) => prop_assert_eq!(parse(&expr.to_string()).unwrap(), expr),
                Err(err) => prop_assert!(err.position <= input.len()),
            }
        }
    }
}
