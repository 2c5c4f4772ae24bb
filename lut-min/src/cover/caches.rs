// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::cube::Cube;
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;

/// Cache for data derived from the elements of a cover.
///
/// Covers are never mutated after construction, so nothing here needs invalidating.
#[derive(Clone, Debug, Default)]
pub(super) struct CoverCache {
    minterm_mask: OnceCell<u64>,
    literal_count: OnceCell<usize>,
}

impl CoverCache {
    pub(super) fn get_or_init_minterm_mask(&self, elements: &BTreeSet<Cube>) -> u64 {
        *self.minterm_mask.get_or_init(|| {
            elements
                .iter()
                .fold(0_u64, |mask, cube| mask | cube.minterm_mask())
        })
    }

    pub(super) fn get_or_init_literal_count(&self, elements: &BTreeSet<Cube>) -> usize {
        *self
            .literal_count
            .get_or_init(|| elements.iter().map(Cube::literal_count).sum())
    }
}
