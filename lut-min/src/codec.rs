// Copyright (c) The lut-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion between hex INIT strings and truth tables.
//!
//! The most significant hex digit holds the highest minterms, so the INIT value read as a number
//! has bit `i` equal to the function's output at minterm `i`. Accepted spellings:
//!
//! * bare digits: `6A40D19FCD51B0EC`
//! * C style: `0x6A40D19FCD51B0EC`
//! * Verilog sized literal: `64'h6A40_D19F_CD51_B0EC`
//!
//! Underscores between digits are ignored.

use crate::{
    errors::{Error, FormatError, FormatErrorKind, RangeError},
    truth_table::TruthTable,
    variable::VarCount,
};
use log::trace;

/// Decodes `hex` into a truth table over `var_count` inputs.
///
/// Leading zero digits beyond the table width are accepted; any set bit past `2^var_count` is a
/// [`FormatError`].
pub fn decode(hex: &str, var_count: usize) -> Result<TruthTable, Error> {
    let var_count = VarCount::new(var_count)?;
    let literal = InitLiteral::parse(hex)?;
    if let Some(declared) = literal.declared_width {
        if declared != var_count.minterm_count() {
            return Err(RangeError::WidthMismatch {
                declared,
                expected: var_count.minterm_count(),
            }
            .into());
        }
    }
    literal.into_table(hex, var_count)
}

/// Decodes `hex`, inferring the number of inputs from its width.
///
/// The width is the Verilog declared width if there is one, otherwise the digit count: 1, 2, 4, 8
/// and 16 digits are 2 through 6 inputs.
pub fn decode_auto(hex: &str) -> Result<TruthTable, Error> {
    let literal = InitLiteral::parse(hex)?;
    let var_count = match literal.declared_width {
        Some(declared) => var_count_for_width(declared)
            .ok_or(RangeError::WidthMismatch {
                declared,
                expected: round_up_width(declared),
            })?,
        None => {
            let digits = literal.digits.len();
            var_count_for_digits(digits).ok_or(RangeError::DigitCount { digits })?
        }
    };
    literal.into_table(hex, var_count)
}

/// Encodes `table` as upper-case hex, zero-padded to the table width.
pub fn encode(table: &TruthTable) -> String {
    let digits = table.var_count().hex_digits();
    format!("{:0width$X}", table.mask(), width = digits)
}

/// Encodes `table` as a Verilog sized literal, for example `16'h8888`.
pub fn encode_verilog(table: &TruthTable) -> String {
    format!("{}'h{}", table.var_count().minterm_count(), encode(table))
}

fn var_count_for_digits(digits: usize) -> Option<VarCount> {
    VarCount::RANGE
        .map(|count| VarCount::new(count).expect("count is in range"))
        .find(|var_count| var_count.hex_digits() == digits)
}

fn var_count_for_width(width: usize) -> Option<VarCount> {
    VarCount::RANGE
        .map(|count| VarCount::new(count).expect("count is in range"))
        .find(|var_count| var_count.minterm_count() == width)
}

// Nearest supported width, used to report what a bad declared width should have been.
fn round_up_width(width: usize) -> usize {
    width.clamp(4, 64).next_power_of_two()
}

/// A syntactically valid INIT literal that hasn't been checked against a width yet.
#[derive(Debug)]
struct InitLiteral {
    declared_width: Option<usize>,
    /// Hex digit values, most significant first, with separators removed.
    digits: Vec<u8>,
}

impl InitLiteral {
    fn parse(input: &str) -> Result<Self, FormatError> {
        let trimmed = input.trim();
        let (declared_width, body, body_offset) = match trimmed.find('\'') {
            Some(quote_ix) => {
                let prefix = &trimmed[..quote_ix];
                let rest = &trimmed[quote_ix + 1..];
                let invalid_prefix = || {
                    FormatError::new(
                        input,
                        FormatErrorKind::InvalidPrefix {
                            prefix: trimmed[..=quote_ix].to_owned(),
                        },
                    )
                };
                let width: usize = prefix.parse().map_err(|_| invalid_prefix())?;
                let body = rest
                    .strip_prefix('h')
                    .or_else(|| rest.strip_prefix('H'))
                    .ok_or_else(invalid_prefix)?;
                (Some(width), body, quote_ix + 2)
            }
            None => match trimmed
                .strip_prefix("0x")
                .or_else(|| trimmed.strip_prefix("0X"))
            {
                Some(body) => (None, body, 2),
                None => (None, trimmed, 0),
            },
        };

        let leading_ws = input.len() - input.trim_start().len();
        let mut digits = Vec::with_capacity(body.len());
        for (ix, ch) in body.char_indices() {
            if ch == '_' {
                continue;
            }
            let value = ch.to_digit(16).ok_or_else(|| {
                FormatError::new(
                    input,
                    FormatErrorKind::InvalidDigit {
                        ch,
                        position: leading_ws + body_offset + ix,
                    },
                )
            })?;
            digits.push(value as u8);
        }

        if digits.is_empty() {
            return Err(FormatError::new(input, FormatErrorKind::Empty));
        }

        Ok(Self {
            declared_width,
            digits,
        })
    }

    fn into_table(self, input: &str, var_count: VarCount) -> Result<TruthTable, Error> {
        let width = var_count.minterm_count();
        let mut mask = 0_u64;
        // Walk from the least significant digit so that digit k holds bits 4k..4k+4.
        for (digit_ix, &value) in self.digits.iter().rev().enumerate() {
            for bit_in_digit in 0..4 {
                if value & (1 << bit_in_digit) == 0 {
                    continue;
                }
                let bit = digit_ix * 4 + bit_in_digit;
                if bit >= width {
                    return Err(FormatError::new(
                        input,
                        FormatErrorKind::ExcessBits { bit, width },
                    )
                    .into());
                }
                mask |= 1_u64 << bit;
            }
        }
        trace!("decoded {:?} as {:#x} over {} inputs", input, mask, var_count);
        Ok(TruthTable::from_mask(var_count, mask))
    }
}
