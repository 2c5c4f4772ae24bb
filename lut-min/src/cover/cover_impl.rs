// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::SopDisplay, cube::Cube, truth_table::TruthTable, variable::VarCount};
use std::collections::BTreeSet;

use super::caches::CoverCache;

/// A set of cubes over the same inputs, read as their disjunction (a sum of products).
#[derive(Clone)]
pub struct Cover {
    var_count: VarCount,
    elements: BTreeSet<Cube>,
    cache: CoverCache,
}

impl Cover {
    /// Creates a cover from `elements`.
    ///
    /// Panics if a cube has a different width from `var_count`.
    pub fn new(var_count: VarCount, elements: impl IntoIterator<Item = Cube>) -> Self {
        let elements: BTreeSet<_> = elements.into_iter().collect();
        for elem in &elements {
            assert_eq!(
                elem.var_count(),
                var_count,
                "cube {:?} must have {} inputs",
                elem,
                var_count
            );
        }
        Self {
            var_count,
            elements,
            cache: CoverCache::default(),
        }
    }

    /// The empty cover, which is the constant-false function.
    #[inline]
    pub fn empty(var_count: VarCount) -> Self {
        Self::new(var_count, [])
    }

    #[inline]
    pub fn var_count(&self) -> VarCount {
        self.var_count
    }

    #[inline]
    pub fn cube_count(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn elements(&self) -> &BTreeSet<Cube> {
        &self.elements
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The union of the minterms of every cube.
    #[inline]
    pub fn minterm_mask(&self) -> u64 {
        self.cache.get_or_init_minterm_mask(&self.elements)
    }

    /// Total number of literals across all cubes.
    #[inline]
    pub fn literal_count(&self) -> usize {
        self.cache.get_or_init_literal_count(&self.elements)
    }

    /// Returns the cubes in display order (see [`Cube::canonical_cmp`]).
    pub fn sorted(&self) -> Vec<&Cube> {
        let mut sorted: Vec<_> = self.elements.iter().collect();
        sorted.sort_by(|a, b| a.canonical_cmp(b));
        sorted
    }

    /// Returns the function this cover computes.
    pub fn truth_table(&self) -> TruthTable {
        TruthTable::from_mask(self.var_count(), self.minterm_mask())
    }

    /// Checks that this cover computes exactly `table`.
    ///
    /// Returns the smallest minterm where they disagree otherwise.
    pub fn check_logically_equivalent(&self, table: &TruthTable) -> Result<(), usize> {
        match self.truth_table().first_difference(table) {
            Some(minterm) => Err(minterm),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn algebraic_display(&self) -> SopDisplay<'_> {
        SopDisplay::new(self)
    }
}

impl PartialEq for Cover {
    fn eq(&self, other: &Self) -> bool {
        self.var_count() == other.var_count() && self.elements == other.elements
    }
}

impl Eq for Cover {}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(count: usize) -> VarCount {
        VarCount::new(count).unwrap()
    }

    fn cover_from_numeric(numeric: &[&[u8]]) -> Cover {
        let var_count = vars(numeric[0].len());
        Cover::new(
            var_count,
            numeric
                .iter()
                .map(|numeric| Cube::from_numeric(numeric).unwrap()),
        )
    }

    #[test]
    fn test_derived_data() {
        // A~B + C
        let cover = cover_from_numeric(&[&[1, 0, 2], &[2, 2, 1]]);
        assert_eq!(cover.cube_count(), 2);
        assert_eq!(cover.literal_count(), 3);
        // A~B is minterms 1 and 5, C is 4..8.
        assert_eq!(cover.minterm_mask(), 0b1111_0010);
        assert_eq!(
            cover.truth_table(),
            TruthTable::from_minterms(vars(3), [1, 4, 5, 6, 7])
        );

        let empty = Cover::empty(vars(3));
        assert!(empty.is_empty());
        assert_eq!(empty.minterm_mask(), 0);
        assert!(empty.truth_table().is_zero());
    }

    #[test]
    fn test_check_logically_equivalent() {
        let cover = cover_from_numeric(&[&[1, 2, 0], &[2, 1, 2]]);
        // B | A & ~C covers 1, 2, 3, 6 and 7.
        let table = TruthTable::from_minterms(vars(3), [1, 2, 3, 6, 7]);
        assert_eq!(cover.check_logically_equivalent(&table), Ok(()));

        let missing = TruthTable::from_minterms(vars(3), [1, 2, 3, 7]);
        assert_eq!(cover.check_logically_equivalent(&missing), Err(6));
    }

    #[test]
    fn test_sorted() {
        let cover = cover_from_numeric(&[&[1, 1, 0], &[2, 1, 2], &[0, 2, 2]]);
        let sorted: Vec<_> = cover
            .sorted()
            .into_iter()
            .map(|cube| cube.matrix_display().to_string())
            .collect();
        assert_eq!(sorted, vec!["0--", "-1-", "110"]);
    }

    #[test]
    #[should_panic(expected = "must have 3 inputs")]
    fn test_width_mismatch() {
        Cover::new(vars(3), [Cube::universe(vars(4))]);
    }
}
