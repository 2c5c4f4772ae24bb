// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::Cover, cube::Cube, truth_table::TruthTable};
use itertools::Itertools;
use log::{debug, trace};
use std::collections::{BTreeMap, BTreeSet};

impl TruthTable {
    /// Computes every prime implicant of this function by Quine-McCluskey combining.
    ///
    /// Each round combines the cubes of one generation into the next; cubes that took part in no
    /// combination are prime. The rounds stop once a generation produces nothing new, which takes
    /// at most `var_count` rounds since every combination removes a literal.
    pub fn prime_implicants(&self) -> Cover {
        let var_count = self.var_count();
        let mut generation = Generation::new(
            self.minterms()
                .map(|minterm| Cube::minterm(var_count, minterm)),
        );
        let mut primes = BTreeSet::new();

        let mut level = 0;
        while !generation.is_empty() {
            let (next, unused) = generation.combine();
            debug!(
                "generation {}: {} cubes, {} prime",
                level,
                generation.cube_count(),
                unused.len()
            );
            primes.extend(unused);
            generation = next;
            level += 1;
        }

        Cover::new(var_count, primes)
    }
}

/// The cubes of one round, grouped by weight.
#[derive(Clone, Debug, Default)]
struct Generation {
    classes: BTreeMap<usize, BTreeSet<Cube>>,
}

impl Generation {
    fn new(cubes: impl IntoIterator<Item = Cube>) -> Self {
        let mut classes: BTreeMap<usize, BTreeSet<Cube>> = BTreeMap::new();
        for cube in cubes {
            classes.entry(cube.weight()).or_default().insert(cube);
        }
        Self { classes }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn cube_count(&self) -> usize {
        self.classes.values().map(BTreeSet::len).sum()
    }

    /// Returns the next generation and the cubes of this one that combined with nothing.
    fn combine(&self) -> (Generation, Vec<Cube>) {
        let mut used: BTreeSet<&Cube> = BTreeSet::new();
        let mut combined = Vec::new();

        // Cubes that differ in exactly one 0/1 position have weights differing by exactly one.
        for (weight, lower) in &self.classes {
            let upper = match self.classes.get(&(weight + 1)) {
                Some(upper) => upper,
                None => continue,
            };
            for (c, d) in lower.iter().cartesian_product(upper) {
                if let Some(cube) = c.combine(d) {
                    trace!("{:?} + {:?} => {:?}", c, d, cube);
                    used.insert(c);
                    used.insert(d);
                    combined.push(cube);
                }
            }
        }

        let unused = self
            .classes
            .values()
            .flatten()
            .filter(|cube| !used.contains(cube))
            .cloned()
            .collect();
        (Generation::new(combined), unused)
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

    fn cover_from_numeric(var_count: VarCount, numeric: &[&[u8]]) -> Cover {
        Cover::new(
            var_count,
            numeric
                .iter()
                .map(|numeric| Cube::from_numeric(numeric).unwrap()),
        )
    }

    #[test_log::test]
    fn test_basic() {
        let table = TruthTable::from_minterms(vars(4), [4, 8, 9, 10, 11, 12, 14, 15]);
        let primes = table.prime_implicants();
        let expected = cover_from_numeric(
            vars(4),
            &[&[0, 0, 1, 2], &[0, 2, 2, 1], &[2, 1, 2, 1], &[2, 2, 0, 1]],
        );
        assert_eq!(primes, expected);
    }

    #[test]
    fn test_isolated_minterm() {
        // Minterms 0 and 3 have no neighbour, so each is its own prime.
        let table = TruthTable::from_minterms(vars(2), [0, 3]);
        let expected = cover_from_numeric(vars(2), &[&[0, 0], &[1, 1]]);
        assert_eq!(table.prime_implicants(), expected);
    }

    #[test]
    fn test_constants() {
        assert!(TruthTable::zero(vars(5)).prime_implicants().is_empty());
        let primes = TruthTable::one(vars(5)).prime_implicants();
        assert_eq!(primes, Cover::new(vars(5), [Cube::universe(vars(5))]));
    }

    proptest! {
        #[test]
        fn proptest_primes_are_prime(table: TruthTable) {
            let primes = table.prime_implicants();
            let on_set = table.mask();
            // Every prime is an implicant, and together they cover the function.
            prop_assert_eq!(primes.minterm_mask(), on_set);
            for prime in primes.elements() {
                prop_assert_eq!(prime.minterm_mask() & !on_set, 0, "{:?} is an implicant", prime);
                // Raising any literal to don't care leaves the on-set.
                for ix in 0..prime.input.len() {
                    if prime.input[ix].is_none() {
                        continue;
                    }
                    let mut raised = prime.clone();
                    raised.input[ix] = None;
                    prop_assert_ne!(raised.minterm_mask() & !on_set, 0, "{:?} is prime", prime);
                }
            }
        }
    }
}
