// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{ChartRow, CoverState};
use crate::cube::Cube;
use bitvec::prelude::*;
use log::{debug, trace};
use std::cmp::Reverse;

/// Finishes the cover with a branch-and-bound search for the fewest terms, then the fewest
/// literals.
pub(super) fn complete(mut state: CoverState) -> Vec<Cube> {
    let mut search = Search {
        candidates: &state.candidates,
        min_literals: state
            .candidates
            .iter()
            .map(|row| row.cube().literal_count())
            .min()
            .unwrap_or(0),
        selected: Vec::new(),
        literals: 0,
        best: None,
        nodes: 0,
    };
    search.visit(state.uncovered);
    debug!("exact search visited {} nodes", search.nodes);

    let best = search.best.map(|(_, best)| best).unwrap_or_default();
    let rows: Vec<ChartRow> = best
        .into_iter()
        .map(|ix| state.candidates[ix].clone())
        .collect();
    for row in rows {
        state.select(row);
    }
    state.chosen
}

/// (terms, literals), compared lexicographically.
type Cost = (usize, usize);

struct Search<'a> {
    candidates: &'a [ChartRow],
    /// Fewest literals of any candidate, a lower bound on the cost of one more term.
    min_literals: usize,
    selected: Vec<usize>,
    /// Total literals of `selected`.
    literals: usize,
    best: Option<(Cost, Vec<usize>)>,
    nodes: usize,
}

impl<'a> Search<'a> {
    fn visit(&mut self, uncovered: u64) {
        self.nodes += 1;

        if uncovered == 0 {
            let cost = (self.selected.len(), self.literals);
            if self.best.as_ref().map_or(true, |(best, _)| cost < *best) {
                trace!("new best: {} terms, {} literals", cost.0, cost.1);
                self.best = Some((cost, self.selected.clone()));
            }
            return;
        }

        // Any completion needs enough terms to cover what is left at the widest remaining
        // coverage, and each of them costs at least `min_literals`.
        if let Some(((best_terms, best_literals), _)) = self.best {
            let widest = self
                .candidates
                .iter()
                .map(|row| row.coverage(uncovered) as usize)
                .max()
                .unwrap_or(0);
            if widest == 0 {
                return;
            }
            let needed = (uncovered.count_ones() as usize + widest - 1) / widest;
            let terms = self.selected.len() + needed;
            if terms > best_terms
                || (terms == best_terms
                    && self.literals + needed * self.min_literals >= best_literals)
            {
                return;
            }
        }

        // Branch on the first minterm with the fewest covering candidates.
        let mut branch: Option<Vec<usize>> = None;
        for minterm in uncovered.view_bits::<Lsb0>().iter_ones() {
            let covering: Vec<usize> = self
                .candidates
                .iter()
                .enumerate()
                .filter(|(_, row)| row.covers(minterm))
                .map(|(ix, _)| ix)
                .collect();
            if branch
                .as_ref()
                .map_or(true, |branch| covering.len() < branch.len())
            {
                branch = Some(covering);
            }
        }

        let mut branch = branch.unwrap_or_default();
        let candidates = self.candidates;
        branch.sort_by(|&a, &b| {
            let (a, b) = (&candidates[a], &candidates[b]);
            Reverse(a.coverage(uncovered))
                .cmp(&Reverse(b.coverage(uncovered)))
                .then_with(|| a.cube().canonical_cmp(b.cube()))
        });

        for ix in branch {
            let literals = candidates[ix].cube().literal_count();
            self.selected.push(ix);
            self.literals += literals;
            self.visit(uncovered & !candidates[ix].mask());
            self.literals -= literals;
            self.selected.pop();
        }
    }
}
