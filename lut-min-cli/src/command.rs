// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use color_eyre::{eyre::bail, Result};
use log::info;
use lut_min::{
    check_equivalent, codec, cover::Cover, format_sop, init_to_sop, CoverStrategy, Equivalence,
    LogicFunction, MinimizeOptions,
};
use simplelog::LevelFilter;

/// Minimize lookup table functions and convert between INIT values and expressions.
#[derive(Debug, Parser)]
#[clap(name = "lut-min", version)]
pub struct LutMinApp {
    /// Print more log output (-v for debug, -vv for trace)
    #[clap(long, short, global = true, parse(from_occurrences))]
    verbose: u64,

    #[clap(subcommand)]
    command: LutMinCommand,
}

#[derive(Debug, Subcommand)]
pub enum LutMinCommand {
    /// Print a minimal sum of products for a function
    Minimize {
        /// INIT value, for example 6A40D19FCD51B0EC or 16'h8888
        #[clap(long, conflicts_with = "expr", required_unless_present = "expr")]
        init: Option<String>,

        /// Boolean expression over A-F
        #[clap(long)]
        expr: Option<String>,

        /// Number of inputs (inferred if not given)
        #[clap(long)]
        vars: Option<usize>,

        /// Search for the cover with the fewest terms instead of picking greedily
        #[clap(long)]
        exact: bool,

        /// Character written before negated variables
        #[clap(long, default_value_t = '~')]
        negation: char,

        /// Also print the sum of minterms and the prime implicants the cover is chosen from
        #[clap(long)]
        show_primes: bool,
    },

    /// Write an INIT value out as a sum of minterms without minimizing
    ToSop {
        init: String,

        /// Number of inputs (inferred if not given)
        #[clap(long)]
        vars: Option<usize>,
    },

    /// Convert an expression to its INIT value without minimizing
    ToInit {
        expr: String,

        /// Number of inputs (inferred from the highest variable if not given)
        #[clap(long)]
        vars: Option<usize>,

        /// Print as a Verilog sized literal
        #[clap(long)]
        verilog: bool,
    },

    /// Rewrite a sum of products in canonical order
    Format { sop: String },

    /// Check whether two expressions compute the same function
    CheckEquiv { a: String, b: String },
}

impl LutMinApp {
    /// The log level requested on the command line.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn exec(self) -> Result<String> {
        self.command.exec()
    }
}

impl LutMinCommand {
    pub fn exec(self) -> Result<String> {
        match self {
            Self::Minimize {
                init,
                expr,
                vars,
                exact,
                negation,
                show_primes,
            } => {
                let function = match (init, expr) {
                    (Some(init), _) => LogicFunction::from_init(&init, vars)?,
                    (None, Some(expr)) => LogicFunction::from_expr(&expr, vars)?,
                    (None, None) => bail!("one of --init or --expr is required"),
                };
                let strategy = if exact {
                    CoverStrategy::Exact
                } else {
                    CoverStrategy::Greedy
                };
                let options = MinimizeOptions::new().with_strategy(strategy);
                let minimized = function.minimize(&options);
                info!(
                    "{} inputs, INIT {}, {} terms",
                    function.var_count(),
                    minimized.init(),
                    minimized.term_count()
                );
                if show_primes {
                    Ok([
                        stage("minterms", &function.minterm_cover(), negation),
                        stage("prime implicants", &function.prime_cover(), negation),
                        stage("minimal cover", minimized.cover(), negation),
                    ]
                    .join("\n"))
                } else {
                    Ok(minimized
                        .cover()
                        .algebraic_display()
                        .with_negation(negation)
                        .to_string())
                }
            }
            Self::ToInit {
                expr,
                vars,
                verilog,
            } => {
                let function = LogicFunction::from_expr(&expr, vars)?;
                if verilog {
                    Ok(codec::encode_verilog(function.truth_table()))
                } else {
                    Ok(function.to_init())
                }
            }
            Self::ToSop { init, vars } => Ok(init_to_sop(&init, vars)?),
            Self::Format { sop } => Ok(format_sop(&sop)?),
            Self::CheckEquiv { a, b } => match check_equivalent(&a, &b)? {
                Equivalence::Equivalent => Ok("equivalent".to_owned()),
                differ => Ok(format!("not equivalent: {}", differ)),
            },
        }
    }
}

/// One labeled step of a `--show-primes` report, one term per line.
fn stage(label: &str, cover: &Cover, negation: char) -> String {
    let count = cover.cube_count();
    format!(
        "{} ({} {}):\n  {}",
        label,
        count,
        if count == 1 { "term" } else { "terms" },
        cover
            .algebraic_display()
            .with_negation(negation)
            .with_separator("\n  | ")
    )
}
