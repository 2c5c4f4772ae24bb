// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::CoverState;
use crate::cube::Cube;
use itertools::Itertools;
use log::debug;

/// Finishes the cover by repeatedly taking the candidate that covers the most uncovered
/// minterms. Ties go to fewer literals, then canonical order.
pub(super) fn complete(mut state: CoverState) -> Vec<Cube> {
    while !state.is_complete() {
        let uncovered = state.uncovered;
        let ix = state
            .candidates
            .iter()
            .position_min_by(|a, b| {
                b.coverage(uncovered)
                    .cmp(&a.coverage(uncovered))
                    .then_with(|| a.cube().canonical_cmp(b.cube()))
            })
            .expect("uncovered minterms always have a covering candidate");
        let row = state.candidates.remove(ix);
        debug!(
            "greedy pick {:?} covering {} new minterms",
            row.cube(),
            row.coverage(uncovered)
        );
        state.select(row);
    }
    state.chosen
}
