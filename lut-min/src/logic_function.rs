// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    codec,
    cover::Cover,
    cube::Cube,
    errors::Error,
    expr::Expr,
    solver::MinimizeOptions,
    truth_table::TruthTable,
    variable::{VarCount, Variable},
};
use log::debug;
use std::fmt;

/// A single-output Boolean function of 2 to 6 inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicFunction {
    on_set: TruthTable,
}

impl LogicFunction {
    #[inline]
    pub fn new(on_set: TruthTable) -> Self {
        Self { on_set }
    }

    /// Decodes an INIT value. With `var_count` of `None` the width is inferred from the literal.
    pub fn from_init(hex: &str, var_count: Option<usize>) -> Result<Self, Error> {
        let on_set = match var_count {
            Some(var_count) => codec::decode(hex, var_count)?,
            None => codec::decode_auto(hex)?,
        };
        Ok(Self::new(on_set))
    }

    /// Parses and evaluates an expression. With `var_count` of `None` the width is the one the
    /// expression implies.
    pub fn from_expr(expr: &str, var_count: Option<usize>) -> Result<Self, Error> {
        let var_count = var_count.map(VarCount::new).transpose()?;
        let expr = Expr::parse(expr)?;
        Ok(Self::new(expr.truth_table(var_count)?))
    }

    #[inline]
    pub fn var_count(&self) -> VarCount {
        self.on_set.var_count()
    }

    #[inline]
    pub fn truth_table(&self) -> &TruthTable {
        &self.on_set
    }

    /// The INIT value of this function.
    pub fn to_init(&self) -> String {
        codec::encode(&self.on_set)
    }

    /// The unminimized cover with one term per true minterm.
    pub fn minterm_cover(&self) -> Cover {
        let var_count = self.var_count();
        Cover::new(
            var_count,
            self.on_set
                .minterms()
                .map(|minterm| Cube::minterm(var_count, minterm)),
        )
    }

    /// Every prime implicant of the function. Their sum is already equivalent to the function.
    pub fn prime_cover(&self) -> Cover {
        self.on_set.prime_implicants()
    }

    pub fn minimize(&self, options: &MinimizeOptions) -> Minimized {
        let cover = self.on_set.minimal_cover(options);
        debug_assert_eq!(cover.check_logically_equivalent(&self.on_set), Ok(()));
        debug!(
            "minimized {} to {} terms, {} literals",
            self.to_init(),
            cover.cube_count(),
            cover.literal_count()
        );
        Minimized::new(cover)
    }
}

/// The result of minimizing a function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minimized {
    cover: Cover,
    sop: String,
    init: String,
}

impl Minimized {
    fn new(cover: Cover) -> Self {
        let sop = cover.algebraic_display().to_string();
        let init = codec::encode(&cover.truth_table());
        Self { cover, sop, init }
    }

    #[inline]
    pub fn cover(&self) -> &Cover {
        &self.cover
    }

    #[inline]
    pub fn into_cover(self) -> Cover {
        self.cover
    }

    #[inline]
    pub fn term_count(&self) -> usize {
        self.cover.cube_count()
    }

    /// The canonical sum-of-products text.
    #[inline]
    pub fn sop(&self) -> &str {
        &self.sop
    }

    /// The INIT value of the minimized cover, which always equals that of the input.
    #[inline]
    pub fn init(&self) -> &str {
        &self.init
    }
}

impl fmt::Display for Minimized {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.sop)
    }
}

/// Whether two expressions compute the same function.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Equivalence {
    Equivalent,

    /// The functions disagree, first at `minterm` of a `var_count`-input table.
    Differ { minterm: usize, var_count: VarCount },
}

impl Equivalence {
    #[inline]
    pub fn is_equivalent(self) -> bool {
        matches!(self, Equivalence::Equivalent)
    }
}

impl fmt::Display for Equivalence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Equivalence::Equivalent => write!(f, "equivalent"),
            Equivalence::Differ { minterm, var_count } => {
                write!(f, "differ at minterm {} (", minterm)?;
                for (ix, var) in Variable::all(*var_count).enumerate() {
                    if ix > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}={}", var, (minterm >> var.index()) & 1)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Minimizes the function with INIT value `hex` over `var_count` inputs.
pub fn minimize_init(
    hex: &str,
    var_count: usize,
    options: &MinimizeOptions,
) -> Result<Minimized, Error> {
    Ok(LogicFunction::from_init(hex, Some(var_count))?.minimize(options))
}

/// Minimizes an arbitrary expression over the width it implies.
pub fn minimize_expr(expr: &str, options: &MinimizeOptions) -> Result<Minimized, Error> {
    Ok(LogicFunction::from_expr(expr, None)?.minimize(options))
}

/// Converts an expression to its INIT value, without minimizing.
pub fn expr_to_init(expr: &str, var_count: Option<usize>) -> Result<String, Error> {
    Ok(LogicFunction::from_expr(expr, var_count)?.to_init())
}

/// Writes out the function with INIT value `hex` as a sum of minterms, without minimizing.
///
/// With `var_count` of `None` the width is inferred from the literal.
pub fn init_to_sop(hex: &str, var_count: Option<usize>) -> Result<String, Error> {
    let function = LogicFunction::from_init(hex, var_count)?;
    Ok(function.minterm_cover().algebraic_display().to_string())
}

/// Rewrites a sum of products in canonical form: duplicate terms merged, literals in variable
/// order and terms in canonical order. The function is unchanged and no minimization happens.
pub fn format_sop(expr: &str) -> Result<String, Error> {
    let expr = Expr::parse(expr)?;
    let cover = expr.to_sop_cover(expr.implied_var_count())?;
    Ok(cover.algebraic_display().to_string())
}

/// Checks whether two expressions compute the same function.
///
/// Both are evaluated over the wider of the two implied widths.
pub fn check_equivalent(a: &str, b: &str) -> Result<Equivalence, Error> {
    let a = Expr::parse(a)?;
    let b = Expr::parse(b)?;
    let var_count = a.implied_var_count().max(b.implied_var_count());
    let a = a.truth_table(Some(var_count))?;
    let b = b.truth_table(Some(var_count))?;
    Ok(match a.first_difference(&b) {
        Some(minterm) => Equivalence::Differ { minterm, var_count },
        None => Equivalence::Equivalent,
    })
}
