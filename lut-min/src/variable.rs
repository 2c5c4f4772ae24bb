// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::RangeError;
use std::{fmt, ops::RangeInclusive};

/// Smallest supported number of inputs.
pub const MIN_VARS: usize = 2;

/// Largest supported number of inputs (a LUT6).
pub const MAX_VARS: usize = 6;

const VARIABLE_NAMES: [char; MAX_VARS] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// One of the input variables A-F.
///
/// Variable `i` is bit `i` of a minterm index, so `A` is the least significant bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(u8);

impl Variable {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);

    /// Looks up a variable by its upper-case name.
    pub fn from_name(name: char) -> Option<Self> {
        VARIABLE_NAMES
            .iter()
            .position(|&c| c == name)
            .map(|ix| Self(ix as u8))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn name(self) -> char {
        VARIABLE_NAMES[self.index()]
    }

    /// Iterates over the first `var_count` variables in order.
    pub fn all(var_count: VarCount) -> impl Iterator<Item = Self> {
        (0..var_count.get()).map(|ix| Self(ix as u8))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The number of inputs of a function, validated to lie in `MIN_VARS..=MAX_VARS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarCount(u8);

impl VarCount {
    pub const RANGE: RangeInclusive<usize> = MIN_VARS..=MAX_VARS;
    pub const MIN: Self = Self(MIN_VARS as u8);
    pub const MAX: Self = Self(MAX_VARS as u8);

    pub fn new(count: usize) -> Result<Self, RangeError> {
        if Self::RANGE.contains(&count) {
            Ok(Self(count as u8))
        } else {
            Err(RangeError::VarCount(count))
        }
    }

    /// The smallest supported count that includes `var`.
    pub fn covering(var: Variable) -> Self {
        Self((var.index() + 1).max(MIN_VARS) as u8)
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// Number of minterms (truth table rows): `2^n`.
    #[inline]
    pub fn minterm_count(self) -> usize {
        1 << self.0
    }

    /// Number of hex digits needed to write out a truth table of this width.
    #[inline]
    pub fn hex_digits(self) -> usize {
        (self.minterm_count() / 4).max(1)
    }

    /// Mask with one bit set per minterm.
    #[inline]
    pub fn full_mask(self) -> u64 {
        u64::MAX >> (64 - self.minterm_count())
    }

    /// Whether `var` is one of the inputs of a function of this width.
    #[inline]
    pub fn contains(self, var: Variable) -> bool {
        var.index() < self.get()
    }
}

impl fmt::Display for VarCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
