// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::Cover, cube::Cube, truth_table::TruthTable, variable::VarCount};
use proptest::prelude::*;

impl Arbitrary for VarCount {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        VarCount::RANGE
            .prop_map(|count| VarCount::new(count).expect("count is in range"))
            .boxed()
    }
}

impl Arbitrary for TruthTable {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        // Uniform masks are about half full, so also generate sparse and dense ones.
        let mask = prop_oneof![
            any::<u64>(),
            any::<(u64, u64)>().prop_map(|(a, b)| a & b),
            any::<(u64, u64)>().prop_map(|(a, b)| a | b),
        ];
        (any::<VarCount>(), mask)
            .prop_map(|(var_count, mask)| TruthTable::from_mask(var_count, mask))
            .boxed()
    }
}

impl Arbitrary for Cube {
    /// The width of the cube, or any width if `None`.
    type Parameters = Option<VarCount>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(var_count: Self::Parameters) -> Self::Strategy {
        let var_count = match var_count {
            Some(var_count) => Just(var_count).boxed(),
            None => any::<VarCount>(),
        };
        var_count
            .prop_flat_map(|var_count| {
                prop::collection::vec(any::<Option<bool>>(), var_count.get())
                    .prop_map(Cube::new)
            })
            .boxed()
    }
}

impl Arbitrary for Cover {
    /// The range of cube counts, `0..8` if `None`.
    type Parameters = Option<(usize, usize)>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let (min_size, max_size) = params.unwrap_or((0, 8));
        any::<VarCount>()
            .prop_flat_map(move |var_count| {
                prop::collection::btree_set(
                    any_with::<Cube>(Some(var_count)),
                    min_size..max_size,
                )
                .prop_map(move |elements| Cover::new(var_count, elements))
            })
            .boxed()
    }
}
