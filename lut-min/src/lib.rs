// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-level minimization and INIT conversion for lookup tables of 2 to 6 inputs.
//!
//! A function is read either from its INIT value (the truth table as hex, most significant digit
//! holding the highest minterms) or from a Boolean expression over the variables `A` to `F`.
//! Variable `i` is bit `i` of a minterm index, so `A` is the least significant bit.
//!
//! Minimization uses Quine-McCluskey prime implicant generation followed by cover selection (see
//! [`solver`]). Results print as a canonical sum of products such as `(~A & C) | (A & ~B)`.
//!
//! ```
//! use lut_min::{expr_to_init, minimize_init, MinimizeOptions};
//!
//! let minimized = minimize_init("C", 2, &MinimizeOptions::default()).unwrap();
//! assert_eq!(minimized.sop(), "(B)");
//! assert_eq!(expr_to_init("A & B", Some(4)).unwrap(), "8888");
//! ```

pub mod codec;
pub mod cover;
pub mod cube;
pub mod errors;
pub mod expr;
pub mod logic_function;
pub mod primes;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;
pub mod solver;
pub mod truth_table;
pub mod variable;

pub use errors::Error;
pub use logic_function::{
    check_equivalent, expr_to_init, format_sop, init_to_sop, minimize_expr, minimize_init,
    Equivalence, LogicFunction, Minimized,
};
pub use solver::{CoverStrategy, MinimizeOptions};
