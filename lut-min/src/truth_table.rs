// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::variable::{VarCount, Variable};
use bitvec::prelude::*;
use std::fmt;

/// The output column of a function of `var_count` inputs, one bit per minterm.
///
/// Bit `i` is the value of the function for the assignment whose variables are the bits of `i`.
/// A truth table is immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct TruthTable {
    var_count: VarCount,
    bits: BitArray<[u64; 1], Lsb0>,
}

impl TruthTable {
    /// The constant-false function.
    pub fn zero(var_count: VarCount) -> Self {
        Self {
            var_count,
            bits: BitArray::ZERO,
        }
    }

    /// The constant-true function.
    pub fn one(var_count: VarCount) -> Self {
        Self::from_mask(var_count, var_count.full_mask())
    }

    /// Builds a table from a mask where bit `i` is the value at minterm `i`.
    ///
    /// Bits beyond `2^var_count` are ignored.
    pub fn from_mask(var_count: VarCount, mask: u64) -> Self {
        Self {
            var_count,
            bits: BitArray::new([mask & var_count.full_mask()]),
        }
    }

    /// Builds a table by evaluating `f` at every minterm index.
    pub fn from_fn(var_count: VarCount, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut bits: BitArray<[u64; 1], Lsb0> = BitArray::ZERO;
        for minterm in 0..var_count.minterm_count() {
            bits.set(minterm, f(minterm));
        }
        Self { var_count, bits }
    }

    /// Builds a table that is true exactly at the given minterm indexes.
    ///
    /// Panics if an index is out of range for `var_count`.
    pub fn from_minterms(var_count: VarCount, minterms: impl IntoIterator<Item = usize>) -> Self {
        let mut bits: BitArray<[u64; 1], Lsb0> = BitArray::ZERO;
        for minterm in minterms {
            assert!(
                minterm < var_count.minterm_count(),
                "minterm {} must be in range 0..{}",
                minterm,
                var_count.minterm_count()
            );
            bits.set(minterm, true);
        }
        Self { var_count, bits }
    }

    #[inline]
    pub fn var_count(&self) -> VarCount {
        self.var_count
    }

    #[inline]
    pub fn mask(&self) -> u64 {
        self.bits.as_raw_slice()[0]
    }

    /// Iterates over the minterm indexes where the function is true, in ascending order.
    pub fn minterms(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits[..self.var_count.minterm_count()].iter_ones()
    }

    #[inline]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mask() == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.mask() == self.var_count.full_mask()
    }

    /// Returns true if flipping `var` changes the output for at least one assignment.
    pub fn depends_on(&self, var: Variable) -> bool {
        if !self.var_count.contains(var) {
            return false;
        }
        let bit = 1 << var.index();
        (0..self.var_count.minterm_count())
            .filter(|minterm| minterm & bit == 0)
            .any(|minterm| self.bits[minterm] != self.bits[minterm | bit])
    }

    /// The variables this function actually depends on.
    pub fn support(&self) -> Vec<Variable> {
        Variable::all(self.var_count)
            .filter(|&var| self.depends_on(var))
            .collect()
    }

    /// Returns the first minterm at which `self` and `other` differ.
    ///
    /// The two tables must have the same width.
    pub fn first_difference(&self, other: &Self) -> Option<usize> {
        assert_eq!(
            self.var_count, other.var_count,
            "tables being compared must have the same width"
        );
        let diff = self.mask() ^ other.mask();
        (diff != 0).then(|| diff.trailing_zeros() as usize)
    }
}

impl fmt::Debug for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TruthTable")
            .field("var_count", &self.var_count.get())
            .field("init", &format_args!("{}", crate::codec::encode(self)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(count: usize) -> VarCount {
        VarCount::new(count).unwrap()
    }

    #[test]
    fn test_constructors_agree() {
        let from_minterms = TruthTable::from_minterms(vars(3), [1, 2, 7]);
        let from_mask = TruthTable::from_mask(vars(3), 0b1000_0110);
        let from_fn = TruthTable::from_fn(vars(3), |m| matches!(m, 1 | 2 | 7));
        assert_eq!(from_minterms, from_mask);
        assert_eq!(from_minterms, from_fn);
        assert_eq!(from_minterms.minterms().collect::<Vec<_>>(), vec![1, 2, 7]);
        assert_eq!(from_minterms.count_ones(), 3);

        // Bits past the width are dropped.
        assert_eq!(TruthTable::from_mask(vars(2), 0xFF), TruthTable::one(vars(2)));
    }

    #[test]
    fn test_constants() {
        for count in VarCount::RANGE {
            assert!(TruthTable::zero(vars(count)).is_zero());
            assert!(TruthTable::one(vars(count)).is_one());
            assert!(TruthTable::one(vars(count)).support().is_empty());
        }
    }

    #[test]
    fn test_support() {
        // A & C over four variables
        let table = TruthTable::from_fn(vars(4), |m| m & 0b0101 == 0b0101);
        assert_eq!(table.support(), vec![Variable::A, Variable::C]);
        assert!(!table.depends_on(Variable::B));
        assert!(!table.depends_on(Variable::F));

        // Parity of all six inputs depends on every one of them.
        let parity = TruthTable::from_fn(VarCount::MAX, |m| m.count_ones() % 2 == 1);
        assert_eq!(parity.support().len(), 6);
    }

    #[test]
    fn test_first_difference() {
        let a = TruthTable::from_minterms(vars(3), [0, 5]);
        let b = TruthTable::from_minterms(vars(3), [0, 4, 5]);
        assert_eq!(a.first_difference(&b), Some(4));
        assert_eq!(a.first_difference(&a), None);
    }
}
