use crate::bhattacharyya::check_block_len;
use crate::error::{ensure_bits, ensure_len, PolarError};
use crate::selector::ChannelPartition;

/// Encode `information` (K bits) together with `frozen` (N − K bits) into an
/// N-bit polar code word.
///
/// Information bits land on the A positions and frozen bits on the A_c
/// positions, both in increasing index order, before the butterfly transform
/// is applied.
pub fn encode(
    information: &[u8],
    frozen: &[u8],
    partition: &ChannelPartition,
) -> Result<Vec<u8>, PolarError> {
    check_block_len(partition.block_len())?;
    ensure_len("information vector", partition.info_bits(), information.len())?;
    ensure_len("frozen vector", partition.frozen().len(), frozen.len())?;
    ensure_bits(information)?;
    ensure_bits(frozen)?;

    let u = scatter(information, frozen, partition);
    Ok(combine(&u))
}

/// Place information and frozen bits into one N-length buffer.
pub(crate) fn scatter(information: &[u8], frozen: &[u8], partition: &ChannelPartition) -> Vec<u8> {
    let mut u = vec![0u8; partition.block_len()];
    for (&pos, &bit) in partition.information().iter().zip(information) {
        u[pos] = bit;
    }
    for (&pos, &bit) in partition.frozen().iter().zip(frozen) {
        u[pos] = bit;
    }
    u
}

/// Recursive polar transform: `x = [combine(u_odd ^ u_even), combine(u_even)]`
/// where `u_odd`/`u_even` are the bits at 1-based odd/even positions.
pub fn combine(u: &[u8]) -> Vec<u8> {
    if u.len() <= 1 {
        return u.to_vec();
    }

    let (mixed, passed): (Vec<u8>, Vec<u8>) = u
        .chunks_exact(2)
        .map(|pair| (pair[0] ^ pair[1], pair[1]))
        .unzip();

    let mut x = combine(&mixed);
    x.extend(combine(&passed));
    x
}
