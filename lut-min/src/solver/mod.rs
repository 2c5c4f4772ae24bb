// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Selection of a small cover from the prime implicants of a function.
//!
//! Solving starts with a reduction loop over the [`CoverageChart`]. Essential rows are taken,
//! rows that cover nothing new are dropped and dominated rows are removed, until nothing
//! changes. Whatever is left is the cyclic core, which is finished either greedily or by an exact
//! branch-and-bound search depending on the [`CoverStrategy`].
//!
//! The greedy strategy is best-effort: its cover is always exact and made of primes, but it may
//! use more terms than necessary.

mod chart;
mod exact;
mod greedy;

pub use chart::*;

use crate::{cover::Cover, cube::Cube, truth_table::TruthTable};
use bitvec::prelude::*;
use itertools::Itertools;
use log::{debug, trace};
use std::cmp::Ordering;

/// How the cyclic core left after reduction is covered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CoverStrategy {
    /// Repeatedly take the row covering the most uncovered minterms.
    Greedy,

    /// Search for the cover with the fewest terms, then the fewest literals.
    Exact,
}

impl Default for CoverStrategy {
    fn default() -> Self {
        Self::Greedy
    }
}

/// Options for minimization.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MinimizeOptions {
    strategy: CoverStrategy,
}

impl MinimizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: CoverStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline]
    pub fn strategy(&self) -> CoverStrategy {
        self.strategy
    }
}

impl TruthTable {
    /// Returns a minimal sum-of-products cover of this function.
    ///
    /// The constant-false function gives the empty cover and the constant-true function gives the
    /// single universe cube.
    pub fn minimal_cover(&self, options: &MinimizeOptions) -> Cover {
        let var_count = self.var_count();
        if self.is_zero() {
            return Cover::empty(var_count);
        }
        if self.is_one() {
            return Cover::new(var_count, [Cube::universe(var_count)]);
        }

        let primes = self.prime_implicants();
        let chart = CoverageChart::new(self, &primes);
        trace!("coverage chart:\n{}", chart.display());

        let mut state = CoverState::new(&chart);
        state.reduce();
        let chosen = match options.strategy {
            CoverStrategy::Greedy => greedy::complete(state),
            CoverStrategy::Exact => exact::complete(state),
        };
        Cover::new(var_count, chosen)
    }
}

/// The progress of a cover selection: what is still uncovered, which rows are still eligible,
/// and what has been chosen so far.
#[derive(Clone, Debug)]
pub(crate) struct CoverState {
    uncovered: u64,
    candidates: Vec<ChartRow>,
    chosen: Vec<Cube>,
}

impl CoverState {
    pub(crate) fn new(chart: &CoverageChart) -> Self {
        Self {
            uncovered: chart.on_set(),
            candidates: chart.rows().to_vec(),
            chosen: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn is_complete(&self) -> bool {
        self.uncovered == 0
    }

    /// Runs essential extraction and dominance removal until neither changes anything.
    pub(crate) fn reduce(&mut self) {
        let mut round = 0;
        let mut changed = true;
        while changed && !self.is_complete() {
            changed = self.extract_essentials();
            let uncovered = self.uncovered;
            self.candidates.retain(|row| row.mask() & uncovered != 0);
            changed |= self.remove_dominated();
            debug!(
                "reduction round {}: {} chosen, {} candidates, {} minterms uncovered",
                round,
                self.chosen.len(),
                self.candidates.len(),
                self.uncovered.count_ones()
            );
            round += 1;
        }
    }

    /// Takes every candidate that is the only cover of some uncovered minterm.
    ///
    /// Minterms are visited in ascending order and each choice is applied immediately, so a
    /// later minterm sees the candidates that remain.
    fn extract_essentials(&mut self) -> bool {
        let mut changed = false;
        let start = self.uncovered;
        for minterm in start.view_bits::<Lsb0>().iter_ones() {
            // An earlier essential may have covered this one already.
            if (self.uncovered >> minterm) & 1 == 0 {
                continue;
            }
            let only_cover = {
                let mut covering = self.candidates.iter().positions(|row| row.covers(minterm));
                match (covering.next(), covering.next()) {
                    (Some(ix), None) => Some(ix),
                    _ => None,
                }
            };
            if let Some(ix) = only_cover {
                let row = self.candidates.remove(ix);
                debug!("essential {:?} for minterm {}", row.cube(), minterm);
                self.select(row);
                changed = true;
            }
        }
        changed
    }

    /// Removes candidates whose remaining coverage is contained in another candidate's at no
    /// lower literal cost. Of two candidates with equal coverage the canonically smaller one
    /// stays.
    fn remove_dominated(&mut self) -> bool {
        let uncovered = self.uncovered;
        let dominated: Vec<bool> = self
            .candidates
            .iter()
            .enumerate()
            .map(|(ix, row)| {
                let row_cover = row.mask() & uncovered;
                self.candidates.iter().enumerate().any(|(other_ix, other)| {
                    if ix == other_ix {
                        return false;
                    }
                    let other_cover = other.mask() & uncovered;
                    row_cover & !other_cover == 0
                        && other.cube().literal_count() <= row.cube().literal_count()
                        && (row_cover != other_cover
                            || other.cube().canonical_cmp(row.cube()) == Ordering::Less)
                })
            })
            .collect();

        let mut changed = false;
        let mut flags = dominated.into_iter();
        self.candidates.retain(|row| {
            let is_dominated = flags.next().unwrap_or(false);
            if is_dominated {
                trace!("{:?} is dominated", row.cube());
                changed = true;
            }
            !is_dominated
        });
        changed
    }

    fn select(&mut self, row: ChartRow) {
        self.uncovered &= !row.mask();
        self.chosen.push(row.into_cube());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::VarCount;
    use proptest::prelude::*;

    fn vars(count: usize) -> VarCount {
        VarCount::new(count).unwrap()
    }

    fn exact_options() -> MinimizeOptions {
        MinimizeOptions::new().with_strategy(CoverStrategy::Exact)
    }

    fn sop(cover: &Cover) -> String {
        cover.algebraic_display().to_string()
    }

    #[test_log::test]
    fn test_essentials_only() {
        let table = TruthTable::from_minterms(vars(4), [4, 8, 9, 10, 11, 12, 14, 15]);
        let chart = CoverageChart::new(&table, &table.prime_implicants());
        let mut state = CoverState::new(&chart);
        state.reduce();
        assert!(state.is_complete(), "essentials and dominance finish the cover");

        let cover = table.minimal_cover(&MinimizeOptions::default());
        assert_eq!(sop(&cover), "(B & D) | (~C & D) | (~A & ~B & C)");
        assert_eq!(table.minimal_cover(&exact_options()), cover);
    }

    #[test_log::test]
    fn test_cyclic_core() {
        // 0x7E over three variables is true everywhere except 0 and 7. Its six primes form a
        // cycle with no essentials.
        let table = TruthTable::from_mask(vars(3), 0x7E);
        let chart = CoverageChart::new(&table, &table.prime_implicants());
        assert_eq!(chart.rows().len(), 6);
        assert_eq!(chart.essential_rows().count(), 0);

        let greedy = table.minimal_cover(&MinimizeOptions::default());
        assert_eq!(
            sop(&greedy),
            "(~A & B) | (~A & C) | (A & ~B) | (A & ~C)"
        );
        let exact = table.minimal_cover(&exact_options());
        assert_eq!(sop(&exact), "(~A & C) | (A & ~B) | (B & ~C)");

        let table = TruthTable::from_mask(vars(3), 0xE7);
        assert_eq!(
            sop(&table.minimal_cover(&MinimizeOptions::default())),
            "(~A & B) | (~A & ~C) | (A & ~B) | (A & C)"
        );
        assert_eq!(
            sop(&table.minimal_cover(&exact_options())),
            "(~A & ~C) | (A & ~B) | (B & C)"
        );
    }

    #[test]
    fn test_constants() {
        for count in VarCount::RANGE {
            for options in [MinimizeOptions::default(), exact_options()] {
                let zero = TruthTable::zero(vars(count)).minimal_cover(&options);
                assert!(zero.is_empty());
                assert_eq!(sop(&zero), "false");

                let one = TruthTable::one(vars(count)).minimal_cover(&options);
                assert_eq!(one, Cover::new(vars(count), [Cube::universe(vars(count))]));
                assert_eq!(sop(&one), "true");
            }
        }
    }

    #[test]
    fn test_single_variable() {
        // 0xC over two variables is just B.
        let table = TruthTable::from_mask(vars(2), 0xC);
        assert_eq!(sop(&table.minimal_cover(&MinimizeOptions::default())), "(B)");

        let table = TruthTable::from_mask(VarCount::MAX, 0xC);
        assert_eq!(
            sop(&table.minimal_cover(&MinimizeOptions::default())),
            "(B & ~C & ~D & ~E & ~F)"
        );
    }

    #[test_log::test]
    fn test_exact_large_cyclic_core() {
        // A six-input table with a large cyclic core. The search must bound on remaining
        // coverage and literals to finish quickly.
        let table = TruthTable::from_mask(VarCount::MAX, 0x7EE8_E88E_E88E_8EE7);

        let greedy = table.minimal_cover(&MinimizeOptions::default());
        assert_eq!(greedy.check_logically_equivalent(&table), Ok(()));
        assert_eq!(greedy.cube_count(), 24);

        let exact = table.minimal_cover(&exact_options());
        assert_eq!(exact.check_logically_equivalent(&table), Ok(()));
        assert_eq!(exact.cube_count(), 21);
    }

    proptest! {
        #[test]
        fn proptest_cover_is_exact(table: TruthTable) {
            let cover = table.minimal_cover(&MinimizeOptions::default());
            prop_assert_eq!(cover.check_logically_equivalent(&table), Ok(()));

            let primes = table.prime_implicants();
            for cube in cover.elements() {
                prop_assert!(primes.elements().contains(cube), "{:?} is a prime", cube);
            }

            // Every essential prime is in the cover.
            let chart = CoverageChart::new(&table, &primes);
            for row in chart.essential_rows() {
                prop_assert!(cover.elements().contains(row.cube()), "{:?} is chosen", row.cube());
            }
        }

        #[test]
        fn proptest_exact_never_worse(table: TruthTable) {
            let greedy = table.minimal_cover(&MinimizeOptions::default());
            let exact = table.minimal_cover(&exact_options());
            prop_assert_eq!(exact.check_logically_equivalent(&table), Ok(()));
            prop_assert!(
                (exact.cube_count(), exact.literal_count())
                    <= (greedy.cube_count(), greedy.literal_count())
            );
        }

        #[test]
        fn proptest_deterministic(table: TruthTable) {
            let first = table.minimal_cover(&MinimizeOptions::default());
            let second = table.clone().minimal_cover(&MinimizeOptions::default());
            prop_assert_eq!(sop(&first), sop(&second));
        }
    }
}
