// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types returned by the conversion and parsing entry points.
//!
//! Minimization itself never fails: every error here is raised while validating input.

use thiserror::Error;

/// Any error produced by this crate.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// A hex INIT string could not be decoded.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid INIT value {input:?}: {kind}")]
pub struct FormatError {
    pub input: String,
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub(crate) fn new(input: &str, kind: FormatErrorKind) -> Self {
        Self {
            input: input.to_owned(),
            kind,
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatErrorKind {
    #[error("no hex digits")]
    Empty,
    #[error("invalid hex digit {ch:?} at position {position}")]
    InvalidDigit { ch: char, position: usize },
    #[error("malformed width prefix {prefix:?}")]
    InvalidPrefix { prefix: String },
    #[error("bit {bit} is set but the table only has {width} bits")]
    ExcessBits { bit: usize, width: usize },
}

/// An expression could not be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("syntax error at position {position}: {kind}")]
pub struct SyntaxError {
    /// Byte offset into the input.
    pub position: usize,
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub(crate) fn new(position: usize, kind: SyntaxErrorKind) -> Self {
        Self { position, kind }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("unknown variable {0:?} (expected one of A-F)")]
    UnknownVariable(String),
    #[error("expected an operand, found {0}")]
    MissingOperand(String),
    #[error("unclosed parenthesis")]
    UnclosedParen,
    #[error("unmatched closing parenthesis")]
    UnmatchedParen,
    #[error("unexpected trailing {0}")]
    TrailingInput(String),
    #[error("expression is not a sum of products")]
    NotSumOfProducts,
    #[error("operators nested more than {limit} deep")]
    TooDeep { limit: usize },
}

/// A numeric cube description contained something other than 0, 1 or 2, or had an unsupported
/// length.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("invalid numeric cube representation")]
pub struct InvalidCubeNumeric;

/// A variable count or width is outside what a lookup table supports.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("variable count {0} is outside 2..=6")]
    VarCount(usize),
    #[error("declared width of {declared} bits does not match {expected} bits")]
    WidthMismatch { declared: usize, expected: usize },
    #[error("{digits} hex digits does not correspond to any table width")]
    DigitCount { digits: usize },
    #[error("variable {var} is outside a {var_count}-variable function")]
    VariableOutOfRange { var: char, var_count: usize },
}
