//! Key-seeded erasure masks.
//!
//! The key bits are read as a big-endian integer and the message counter is
//! added to it without overflow. The sum, in its shortest big-endian form of
//! at least 64 bits, is expanded with BLAKE3 into the seed of a `StdRng`, which
//! shuffles a mask of `erase_count` set flags followed by clear ones.

use crate::bits;
use crate::error::SchemeError;
use polar_core::channel::shuffled_erasures;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::trace;
use zeroize::Zeroizing;

const SEED_CONTEXT: &str = "polar-scheme erasure mask seed v1";
const MIN_SEED_BYTES: usize = 8;

/// 32-byte RNG seed for the given key and message counter.
pub fn derive_seed(key: &[u8], counter: u64) -> Result<Zeroizing<[u8; 32]>, SchemeError> {
    let raw = Zeroizing::new(bits::to_integer_bytes(key)?);
    // one spare byte holds the carry out of the addition
    let width = raw.len().max(MIN_SEED_BYTES) + 1;
    let mut integer = Zeroizing::new(vec![0u8; width]);
    integer[width - raw.len()..].copy_from_slice(&raw);
    add_counter(&mut integer, counter);

    let leading = integer[..width - MIN_SEED_BYTES]
        .iter()
        .take_while(|&&byte| byte == 0)
        .count();
    Ok(Zeroizing::new(blake3::derive_key(SEED_CONTEXT, &integer[leading..])))
}

/// Mask of `block_len` flags with exactly `erase_count` set, determined by
/// the key and the message counter.
pub fn erasure_mask(
    key: &[u8],
    counter: u64,
    block_len: usize,
    erase_count: usize,
) -> Result<Vec<bool>, SchemeError> {
    let seed = derive_seed(key, counter)?;
    let mut rng = StdRng::from_seed(*seed);
    trace!(counter, block_len, erase_count, "derived erasure mask");
    Ok(shuffled_erasures(block_len, erase_count, &mut rng))
}

fn add_counter(integer: &mut [u8], counter: u64) {
    let mut carry = counter;
    for byte in integer.iter_mut().rev() {
        if carry == 0 {
            break;
        }
        let sum = u64::from(*byte) + (carry & 0xff);
        *byte = sum as u8;
        carry = (carry >> 8) + (sum >> 8);
    }
}
