//! Likelihood-ratio arithmetic for successive cancellation over a BEC.
//!
//! Ratios are `W(y|0) / W(y|1)`. On an erasure channel they only ever take
//! the values `0` (bit is 1), `+inf` (bit is 0) and `1` (bit is unknown).

use crate::error::PolarError;

pub const CERTAIN_ZERO: f64 = f64::INFINITY;
pub const CERTAIN_ONE: f64 = 0.0;
pub const UNKNOWN: f64 = 1.0;

/// Likelihood ratio of a single received symbol.
pub fn channel(symbol: Option<u8>, position: usize) -> Result<f64, PolarError> {
    match symbol {
        Some(0) => Ok(CERTAIN_ZERO),
        Some(1) => Ok(CERTAIN_ONE),
        None => Ok(UNKNOWN),
        Some(value) => Err(PolarError::InvalidSymbol { position, value }),
    }
}

/// Ratio for the first bit of a pair from the ratios of the mixed (`l1`)
/// and passed-through (`l2`) branches.
pub fn combine_first(l1: f64, l2: f64) -> f64 {
    let inf1 = l1 == f64::INFINITY;
    let inf2 = l2 == f64::INFINITY;

    if (l1 == 0.0 && l2 == 0.0) || (inf1 && inf2) {
        f64::INFINITY
    } else if (l1 == 0.0 && inf2) || (inf1 && l2 == 0.0) {
        0.0
    } else if (l1 == 1.0 && inf2) || (inf1 && l2 == 1.0) {
        1.0
    } else {
        (l1 * l2 + 1.0) / (l1 + l2)
    }
}

/// Ratio for the second bit of a pair given the decided first bit.
pub fn combine_second(l1: f64, l2: f64, first: u8) -> f64 {
    if first == 0 {
        l2 * l1
    } else {
        div(l2, l1)
    }
}

/// Division with the decoder's conventions for a zero denominator:
/// `inf/0 = inf`, `0/0 = 1` (indeterminate), `x/0 = inf` for `x > 0`.
pub fn div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator == 0.0 {
            UNKNOWN
        } else if numerator > 0.0 {
            f64::INFINITY
        } else {
            numerator / denominator
        }
    } else {
        numerator / denominator
    }
}

/// Hard decision on a likelihood ratio.
///
/// An unknown ratio aborts decoding with [`PolarError::DecodeFailure`];
/// anything outside `{0, 1, inf}` is an invariant violation.
pub fn decide(lr: f64, position: usize) -> Result<u8, PolarError> {
    if lr == CERTAIN_ZERO {
        Ok(0)
    } else if lr == CERTAIN_ONE {
        Ok(1)
    } else if lr == UNKNOWN {
        Err(PolarError::DecodeFailure { position })
    } else {
        Err(PolarError::UnexpectedLikelihood {
            position,
            value: lr,
        })
    }
}
