// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::Cover, cube::Cube, truth_table::TruthTable};
use bitvec::prelude::*;
use std::fmt;

/// One prime implicant in a [`CoverageChart`], with the minterms it covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartRow {
    cube: Cube,
    mask: u64,
}

impl ChartRow {
    pub fn new(cube: Cube) -> Self {
        let mask = cube.minterm_mask();
        Self { cube, mask }
    }

    #[inline]
    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    #[inline]
    pub fn into_cube(self) -> Cube {
        self.cube
    }

    /// The minterms covered by this row.
    #[inline]
    pub fn mask(&self) -> u64 {
        self.mask
    }

    #[inline]
    pub fn covers(&self, minterm: usize) -> bool {
        (self.mask >> minterm) & 1 == 1
    }

    /// How many minterms of `uncovered` this row would cover.
    #[inline]
    pub fn coverage(&self, uncovered: u64) -> u32 {
        (self.mask & uncovered).count_ones()
    }
}

/// The prime implicants of a function against its on-set minterms.
///
/// Rows are kept in canonical cube order (see [`Cube::canonical_cmp`]), which every selection
/// step relies on for reproducible tie-breaking.
#[derive(Clone, Debug)]
pub struct CoverageChart {
    on_set: u64,
    rows: Vec<ChartRow>,
}

impl CoverageChart {
    pub fn new(table: &TruthTable, primes: &Cover) -> Self {
        let mut rows: Vec<_> = primes.elements().iter().cloned().map(ChartRow::new).collect();
        rows.sort_by(|a, b| a.cube.canonical_cmp(&b.cube));
        Self {
            on_set: table.mask(),
            rows,
        }
    }

    /// The minterms that must be covered.
    #[inline]
    pub fn on_set(&self) -> u64 {
        self.on_set
    }

    #[inline]
    pub fn rows(&self) -> &[ChartRow] {
        &self.rows
    }

    /// The on-set minterms in ascending order.
    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.on_set.view_bits::<Lsb0>().iter_ones()
    }

    /// Rows that are the only cover of some column.
    pub fn essential_rows(&self) -> impl Iterator<Item = &ChartRow> + '_ {
        self.rows.iter().filter(move |row| {
            self.columns().any(|minterm| {
                row.covers(minterm)
                    && self
                        .rows
                        .iter()
                        .filter(|other| other.covers(minterm))
                        .count()
                        == 1
            })
        })
    }

    #[inline]
    pub fn display(&self) -> ChartDisplay<'_> {
        ChartDisplay { chart: self }
    }
}

/// Displays a chart as a grid: one line per row, one column per on-set minterm, `x` where the row
/// covers the minterm.
#[derive(Clone, Debug)]
pub struct ChartDisplay<'a> {
    chart: &'a CoverageChart,
}

impl<'a> fmt::Display for ChartDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self
            .chart
            .rows
            .first()
            .map_or(0, |row| row.cube.input.len());

        write!(f, "{:width$} |", "", width = width)?;
        for minterm in self.chart.columns() {
            write!(f, " {:>2}", minterm)?;
        }
        writeln!(f)?;

        for row in &self.chart.rows {
            write!(f, "{} |", row.cube.matrix_display())?;
            for minterm in self.chart.columns() {
                let mark = if row.covers(minterm) { 'x' } else { '.' };
                write!(f, "  {}", mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::VarCount;

    #[test]
    fn test_chart() {
        let table = TruthTable::from_minterms(VarCount::new(3).unwrap(), [0, 1, 3]);
        let chart = CoverageChart::new(&table, &table.prime_implicants());
        assert_eq!(chart.columns().collect::<Vec<_>>(), vec![0, 1, 3]);

        // Primes are A & ~C (1, 3) and ~B & ~C (0, 1), both essential.
        let rows: Vec<_> = chart
            .rows()
            .iter()
            .map(|row| row.cube().matrix_display().to_string())
            .collect();
        assert_eq!(rows, vec!["1-0", "-00"]);
        assert_eq!(chart.essential_rows().count(), 2);
        assert_eq!(chart.rows()[0].coverage(chart.on_set()), 2);

        assert_eq!(
            chart.display().to_string(),
            "    |  0  1  3\n1-0 |  .  x  x\n-00 |  x  x  .\n"
        );
    }
}
