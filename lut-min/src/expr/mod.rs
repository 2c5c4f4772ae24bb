// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boolean expressions over the variables A-F.

mod parser;

pub use parser::MAX_DEPTH;

use crate::{
    cover::Cover,
    cube::Cube,
    errors::{RangeError, SyntaxError, SyntaxErrorKind},
    truth_table::TruthTable,
    variable::{VarCount, Variable},
};
use log::debug;
use std::{collections::BTreeSet, fmt, str::FromStr};

/// A parsed Boolean expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Const(bool),
    Var(Variable),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Parses an infix expression such as `(A & ~B) | C`.
    ///
    /// `!` and `~` both negate. `true`/`false` (any case) and `1`/`0` are constants.
    pub fn parse(input: &str) -> Result<Self, SyntaxError> {
        parser::parse(input)
    }

    /// Evaluates the expression with variable `i` bound to bit `i` of `minterm`.
    pub fn evaluate(&self, minterm: usize) -> bool {
        match self {
            Expr::Const(value) => *value,
            Expr::Var(var) => (minterm >> var.index()) & 1 == 1,
            Expr::Not(inner) => !inner.evaluate(minterm),
            Expr::And(lhs, rhs) => lhs.evaluate(minterm) && rhs.evaluate(minterm),
            Expr::Or(lhs, rhs) => lhs.evaluate(minterm) || rhs.evaluate(minterm),
        }
    }

    /// The distinct variables that appear in the expression.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<Variable>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(var) => {
                vars.insert(*var);
            }
            Expr::Not(inner) => inner.collect_variables(vars),
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                lhs.collect_variables(vars);
                rhs.collect_variables(vars);
            }
        }
    }

    /// The smallest supported width that includes every variable used.
    ///
    /// Variables keep their fixed bit positions, so an expression over `A` and `D` needs four
    /// inputs even though only two appear.
    pub fn implied_var_count(&self) -> VarCount {
        self.variables()
            .into_iter()
            .next_back()
            .map_or(VarCount::MIN, VarCount::covering)
    }

    /// Evaluates the expression at every minterm.
    ///
    /// With `var_count` of `None` the width is [`Self::implied_var_count`]. A forced width may be
    /// wider than needed, in which case the extra inputs don't affect the result, but it may not
    /// exclude a variable that appears.
    pub fn truth_table(&self, var_count: Option<VarCount>) -> Result<TruthTable, RangeError> {
        let implied = self.implied_var_count();
        let var_count = match var_count {
            Some(var_count) => {
                if let Some(&var) = self.variables().iter().find(|&&var| !var_count.contains(var)) {
                    return Err(RangeError::VariableOutOfRange {
                        var: var.name(),
                        var_count: var_count.get(),
                    });
                }
                var_count
            }
            None => implied,
        };

        let table = TruthTable::from_fn(var_count, |minterm| self.evaluate(minterm));
        debug!(
            "evaluated {} over {} inputs: support {:?}",
            self,
            var_count,
            table.support()
        );
        Ok(table)
    }

    /// Reads the expression as a sum of products and returns its terms as cubes, without
    /// minimizing.
    ///
    /// Each term must be a conjunction of variables, negated variables and constants. Terms that
    /// are identically false (containing `false`, or both `X` and `~X`) are dropped.
    pub fn to_sop_cover(&self, var_count: VarCount) -> Result<Cover, SyntaxError> {
        let not_sop = || SyntaxError::new(0, SyntaxErrorKind::NotSumOfProducts);

        let mut terms = Vec::new();
        self.collect_terms(&mut terms);

        let mut cubes = Vec::with_capacity(terms.len());
        'terms: for term in terms {
            let mut factors = Vec::new();
            term.collect_factors(&mut factors);

            let mut input = vec![None; var_count.get()];
            for factor in factors {
                let (var, value) = match factor {
                    Expr::Const(true) => continue,
                    Expr::Const(false) => continue 'terms,
                    Expr::Var(var) => (*var, true),
                    Expr::Not(inner) => match &**inner {
                        Expr::Var(var) => (*var, false),
                        _ => return Err(not_sop()),
                    },
                    _ => return Err(not_sop()),
                };
                let slot = input.get_mut(var.index()).ok_or_else(not_sop)?;
                match *slot {
                    Some(existing) if existing != value => continue 'terms,
                    _ => *slot = Some(value),
                }
            }
            cubes.push(Cube::new(input));
        }

        Ok(Cover::new(var_count, cubes))
    }

    fn collect_terms<'a>(&'a self, terms: &mut Vec<&'a Expr>) {
        match self {
            Expr::Or(lhs, rhs) => {
                lhs.collect_terms(terms);
                rhs.collect_terms(terms);
            }
            other => terms.push(other),
        }
    }

    fn collect_factors<'a>(&'a self, factors: &mut Vec<&'a Expr>) {
        match self {
            Expr::And(lhs, rhs) => {
                lhs.collect_factors(factors);
                rhs.collect_factors(factors);
            }
            other => factors.push(other),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Or(..) => 1,
            Expr::And(..) => 2,
            Expr::Not(_) => 3,
            Expr::Const(_) | Expr::Var(_) => 4,
        }
    }

    fn fmt_child(&self, child: &Expr, right: bool, f: &mut fmt::Formatter) -> fmt::Result {
        let needs_parens = child.precedence() < self.precedence()
            || (right && child.precedence() == self.precedence() && self.precedence() < 3);
        if needs_parens {
            write!(f, "({})", child)
        } else {
            write!(f, "{}", child)
        }
    }
}

impl FromStr for Expr {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Prints the expression with the fewest parentheses that parse back to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Const(value) => write!(f, "{}", value),
            Expr::Var(var) => write!(f, "{}", var),
            Expr::Not(inner) => {
                write!(f, "~")?;
                self.fmt_child(inner, false, f)
            }
            Expr::And(lhs, rhs) => {
                self.fmt_child(lhs, false, f)?;
                write!(f, " & ")?;
                self.fmt_child(rhs, true, f)
            }
            Expr::Or(lhs, rhs) => {
                self.fmt_child(lhs, false, f)?;
                write!(f, " | ")?;
                self.fmt_child(rhs, true, f)
            }
        }
    }
}
