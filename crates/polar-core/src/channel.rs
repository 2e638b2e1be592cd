//! Binary erasure channel simulation.
//!
//! A received symbol is `Some(bit)` when it arrived intact and `None` when
//! the channel erased it. Symbols are never flipped.

use crate::bhattacharyya::check_epsilon;
use crate::error::{ensure_len, PolarError};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How [`simulate`] chooses erased positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErasureMode {
    /// Every position is erased independently with probability ε.
    Probabilistic,
    /// Exactly `round(N·ε)` positions are erased, chosen uniformly.
    #[default]
    ExactCount,
}

/// Number of erased positions for a block of `len` symbols at rate `epsilon`.
/// Halfway products round to the even count.
pub fn erasure_count(len: usize, epsilon: f64) -> usize {
    ((len as f64) * epsilon).round_ties_even() as usize
}

/// Erasure mask where each position is set independently with probability
/// `epsilon`.
pub fn random_erasures<R: Rng + ?Sized>(
    len: usize,
    epsilon: f64,
    rng: &mut R,
) -> Result<Vec<bool>, PolarError> {
    check_epsilon(epsilon)?;
    Ok((0..len).map(|_| rng.gen_bool(epsilon)).collect())
}

/// Erasure mask with exactly `count` positions set, chosen by shuffling.
pub fn shuffled_erasures<R: Rng + ?Sized>(len: usize, count: usize, rng: &mut R) -> Vec<bool> {
    let count = count.min(len);
    let mut mask = vec![true; count];
    mask.resize(len, false);
    mask.shuffle(rng);
    mask
}

/// Erasure mask with exactly `round(len·epsilon)` positions set.
pub fn exact_erasures<R: Rng + ?Sized>(
    len: usize,
    epsilon: f64,
    rng: &mut R,
) -> Result<Vec<bool>, PolarError> {
    check_epsilon(epsilon)?;
    Ok(shuffled_erasures(len, erasure_count(len, epsilon), rng))
}

/// Erase exactly the positions flagged in `mask`.
pub fn erase_bits(codeword: &[u8], mask: &[bool]) -> Result<Vec<Option<u8>>, PolarError> {
    ensure_len("erasure mask", codeword.len(), mask.len())?;
    Ok(codeword
        .iter()
        .zip(mask)
        .map(|(&bit, &erased)| if erased { None } else { Some(bit) })
        .collect())
}

/// Pass `codeword` through a simulated BEC with erasure probability `epsilon`.
pub fn simulate<R: Rng + ?Sized>(
    codeword: &[u8],
    epsilon: f64,
    mode: ErasureMode,
    rng: &mut R,
) -> Result<Vec<Option<u8>>, PolarError> {
    let mask = match mode {
        ErasureMode::Probabilistic => random_erasures(codeword.len(), epsilon, rng)?,
        ErasureMode::ExactCount => exact_erasures(codeword.len(), epsilon, rng)?,
    };
    erase_bits(codeword, &mask)
}

/// Drop erased symbols, keeping the survivors in order.
pub fn puncture(received: &[Option<u8>]) -> Vec<u8> {
    received.iter().flatten().copied().collect()
}

/// Inverse of [`puncture`]: re-insert erasures at the positions flagged in
/// `mask`, filling the remaining positions from `payload` in order.
pub fn expand(payload: &[u8], mask: &[bool]) -> Result<Vec<Option<u8>>, PolarError> {
    let kept = mask.iter().filter(|&&erased| !erased).count();
    ensure_len("punctured payload", kept, payload.len())?;

    let mut survivors = payload.iter();
    Ok(mask
        .iter()
        .map(|&erased| {
            if erased {
                None
            } else {
                survivors.next().copied()
            }
        })
        .collect())
}
