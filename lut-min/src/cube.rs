// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::InvalidCubeNumeric,
    variable::{VarCount, Variable, MAX_VARS},
};
use arrayvec::ArrayVec;
use std::{cmp::Ordering, fmt};

/// A product term: one position per input, each `Some(false)`, `Some(true)` or `None` (don't
/// care).
///
/// Position `i` belongs to variable `i`, so `input[0]` is `A`.
#[derive(Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Cube {
    pub input: ArrayVec<Option<bool>, MAX_VARS>,
}

impl Cube {
    /// Builds a cube from its positions, `A` first.
    ///
    /// Panics if the number of positions isn't a supported variable count.
    pub fn new(input: impl IntoIterator<Item = Option<bool>>) -> Self {
        let input: ArrayVec<Option<bool>, MAX_VARS> = input.into_iter().collect();
        assert!(
            VarCount::RANGE.contains(&input.len()),
            "cube width {} must be in range {:?}",
            input.len(),
            VarCount::RANGE
        );
        Self { input }
    }

    // Uses the representation in the Espresso book: 0 and 1 are literals, 2 is don't care.
    pub fn from_numeric(numeric: &[u8]) -> Result<Self, InvalidCubeNumeric> {
        if !VarCount::RANGE.contains(&numeric.len()) {
            return Err(InvalidCubeNumeric);
        }
        let input = numeric
            .iter()
            .map(|val| match val {
                0 => Ok(Some(false)),
                1 => Ok(Some(true)),
                2 => Ok(None),
                _ => Err(InvalidCubeNumeric),
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { input })
    }

    /// The cube containing exactly one minterm.
    pub fn minterm(var_count: VarCount, minterm: usize) -> Self {
        let input = (0..var_count.get())
            .map(|ix| Some((minterm >> ix) & 1 == 1))
            .collect();
        Self { input }
    }

    /// The cube containing every minterm.
    pub fn universe(var_count: VarCount) -> Self {
        let input = (0..var_count.get()).map(|_| None).collect();
        Self { input }
    }

    #[inline]
    pub fn var_count(&self) -> VarCount {
        VarCount::new(self.input.len()).expect("cube width is validated on construction")
    }

    /// Returns the position for `var`.
    #[inline]
    pub fn get(&self, var: Variable) -> Option<bool> {
        self.input[var.index()]
    }

    /// Number of positions set to 1. Cubes only combine across adjacent weights.
    #[inline]
    pub fn weight(&self) -> usize {
        self.input.iter().filter(|&&c| c == Some(true)).count()
    }

    /// Number of positions that aren't don't-care.
    #[inline]
    pub fn literal_count(&self) -> usize {
        self.input.iter().filter(|c| c.is_some()).count()
    }

    #[inline]
    pub fn is_minterm(&self) -> bool {
        self.input.iter().all(|c| c.is_some())
    }

    #[inline]
    pub fn is_universe(&self) -> bool {
        self.input.iter().all(|c| c.is_none())
    }

    /// Combines two cubes that have the same don't-care positions and differ in exactly one other
    /// position, raising that position to don't care.
    pub fn combine(&self, other: &Cube) -> Option<Self> {
        if self.input.len() != other.input.len() {
            return None;
        }
        let mut conflict = None;
        for (ix, (&c, &d)) in self.input.iter().zip(&other.input).enumerate() {
            match (c, d) {
                (None, None) => {}
                (None, Some(_)) | (Some(_), None) => return None,
                (Some(c), Some(d)) if c == d => {}
                (Some(_), Some(_)) => {
                    if conflict.is_some() {
                        return None;
                    }
                    conflict = Some(ix);
                }
            }
        }

        let conflict = conflict?;
        let mut input = self.input.clone();
        input[conflict] = None;
        Some(Self { input })
    }

    /// Whether every minterm of `other` is also in `self`.
    pub fn contains(&self, other: &Cube) -> bool {
        self.input.len() == other.input.len()
            && self
                .input
                .iter()
                .zip(&other.input)
                .all(|(&c, &d)| c.is_none() || c == d)
    }

    #[inline]
    pub fn contains_minterm(&self, minterm: usize) -> bool {
        self.input
            .iter()
            .enumerate()
            .all(|(ix, &c)| match c {
                Some(value) => ((minterm >> ix) & 1 == 1) == value,
                None => true,
            })
    }

    /// The set of minterms in this cube, as a mask with bit `i` set for minterm `i`.
    pub fn minterm_mask(&self) -> u64 {
        (0..self.var_count().minterm_count())
            .filter(|&minterm| self.contains_minterm(minterm))
            .fold(0_u64, |mask, minterm| mask | (1_u64 << minterm))
    }

    /// Total order used wherever a choice between cubes must be reproducible: fewer literals
    /// first, then position by position from `A`, with 0 before 1 before don't care.
    pub fn canonical_cmp(&self, other: &Cube) -> Ordering {
        fn rank(c: Option<bool>) -> u8 {
            match c {
                Some(false) => 0,
                Some(true) => 1,
                None => 2,
            }
        }

        self.literal_count()
            .cmp(&other.literal_count())
            .then_with(|| {
                self.input
                    .iter()
                    .map(|&c| rank(c))
                    .cmp(other.input.iter().map(|&c| rank(c)))
            })
    }

    #[inline]
    pub fn matrix_display(&self) -> CubeMatrixDisplay<'_> {
        CubeMatrixDisplay { cube: self }
    }
}

impl fmt::Debug for Cube {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cube")
            .field(&format_args!("{}", self.matrix_display()))
            .finish()
    }
}

/// Displays a cube in the form `10-`, `A` first, with dashes for don't cares.
#[derive(Clone, Debug)]
pub struct CubeMatrixDisplay<'a> {
    cube: &'a Cube,
}

impl<'a> fmt::Display for CubeMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &input in &self.cube.input {
            let c = match input {
                Some(true) => '1',
                Some(false) => '0',
                None => '-',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(count: usize) -> VarCount {
        VarCount::new(count).unwrap()
    }

    #[test]
    fn test_from_numeric() {
        let cube = Cube::from_numeric(&[1, 0, 2]).unwrap();
        assert_eq!(cube.get(Variable::A), Some(true));
        assert_eq!(cube.get(Variable::B), Some(false));
        assert_eq!(cube.get(Variable::C), None);
        assert_eq!(format!("{:?}", cube), "Cube(10-)");

        assert_eq!(Cube::from_numeric(&[1, 3, 0]), Err(InvalidCubeNumeric));
        assert_eq!(Cube::from_numeric(&[1]), Err(InvalidCubeNumeric));
        assert_eq!(Cube::from_numeric(&[2; 7]), Err(InvalidCubeNumeric));
    }

    #[test]
    fn test_minterm() {
        // minterm 6 = 0b110: A = 0, B = 1, C = 1
        let cube = Cube::minterm(vars(3), 6);
        assert_eq!(cube, Cube::from_numeric(&[0, 1, 1]).unwrap());
        assert!(cube.is_minterm());
        assert_eq!(cube.weight(), 2);
        assert_eq!(cube.minterm_mask(), 1 << 6);

        let universe = Cube::universe(vars(3));
        assert!(universe.is_universe());
        assert!(universe.contains(&cube));
        assert!(!cube.contains(&universe));
        assert_eq!(universe.minterm_mask(), 0xFF);
    }

    #[test]
    fn test_combine() {
        let a = Cube::from_numeric(&[0, 1, 2]).unwrap();
        let b = Cube::from_numeric(&[1, 1, 2]).unwrap();
        let combined = a.combine(&b).unwrap();
        assert_eq!(combined, Cube::from_numeric(&[2, 1, 2]).unwrap());
        assert_eq!(combined.minterm_mask(), a.minterm_mask() | b.minterm_mask());
        // -1- is minterms 2, 3, 6 and 7.
        assert_eq!(combined.minterm_mask(), 0b1100_1100);

        // Different don't-care positions.
        let c = Cube::from_numeric(&[1, 2, 1]).unwrap();
        assert_eq!(a.combine(&c), None);
        // Two conflicting positions.
        let d = Cube::from_numeric(&[1, 0, 2]).unwrap();
        assert_eq!(a.combine(&d), None);
        // Identical cubes don't combine.
        assert_eq!(a.combine(&a), None);
    }

    #[test]
    fn test_canonical_order() {
        let mut cubes: Vec<_> = [
            [2, 1, 2],
            [1, 2, 0],
            [0, 2, 2],
            [0, 1, 2],
            [2, 2, 1],
            [0, 0, 0],
        ]
        .iter()
        .map(|numeric| Cube::from_numeric(numeric).unwrap())
        .collect();
        cubes.sort_by(Cube::canonical_cmp);
        let displayed: Vec<_> = cubes.iter().map(|c| c.matrix_display().to_string()).collect();
        assert_eq!(
            displayed,
            vec!["0--", "-1-", "--1", "01-", "1-0", "000"],
        );
    }
}
