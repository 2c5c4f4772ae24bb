// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::Cover, cube::Cube, variable::Variable};
use itertools::{Itertools, Position};
use std::{borrow::Cow, fmt};

/// Default marker written before a negated variable.
pub const DEFAULT_NEGATION: char = '~';

/// Default text written between two product terms.
pub const DEFAULT_TERM_SEPARATOR: &str = " | ";

/// Displays a cover as a sum of products, for example `(~A & B) | (C)`.
///
/// Terms appear in canonical cube order and every term is parenthesized. The empty cover prints
/// as `false` and a cover containing the universe cube prints as `true`.
#[derive(Clone, Debug)]
pub struct SopDisplay<'a> {
    cover: &'a Cover,
    negation: char,
    separator: Cow<'a, str>,
}

impl<'a> SopDisplay<'a> {
    pub fn new(cover: &'a Cover) -> Self {
        Self {
            cover,
            negation: DEFAULT_NEGATION,
            separator: Cow::Borrowed(DEFAULT_TERM_SEPARATOR),
        }
    }

    /// Sets the marker written before negated variables, usually `~` or `!`.
    pub fn with_negation(mut self, negation: char) -> Self {
        self.negation = negation;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for SopDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.cover.is_empty() {
            return write!(f, "false");
        }
        if self.cover.elements().iter().any(Cube::is_universe) {
            return write!(f, "true");
        }

        for elem in self.cover.sorted().into_iter().with_position() {
            match elem {
                Position::First(cube) | Position::Middle(cube) => {
                    write!(f, "{}{}", TermDisplay::new(cube, self.negation), self.separator)?;
                }
                Position::Last(cube) | Position::Only(cube) => {
                    write!(f, "{}", TermDisplay::new(cube, self.negation))?;
                }
            }
        }
        Ok(())
    }
}

/// Displays a single cube as a parenthesized product term, for example `(A & ~C)`.
#[derive(Clone, Debug)]
pub struct TermDisplay<'a> {
    cube: &'a Cube,
    negation: char,
}

impl<'a> TermDisplay<'a> {
    pub fn new(cube: &'a Cube, negation: char) -> Self {
        Self { cube, negation }
    }
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.cube.is_universe() {
            return write!(f, "true");
        }

        let literals = Variable::all(self.cube.var_count())
            .filter_map(|var| Some((var, self.cube.get(var)?)));

        write!(f, "(")?;
        for (ix, (var, value)) in literals.enumerate() {
            if ix > 0 {
                write!(f, " & ")?;
            }
            if !value {
                write!(f, "{}", self.negation)?;
            }
            write!(f, "{}", var)?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for Cover {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cover")
            .field(&format_args!("{}", self.algebraic_display()))
            .finish()
    }
}
