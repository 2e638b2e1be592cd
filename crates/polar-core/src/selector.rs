use crate::bhattacharyya::check_block_len;
use crate::error::PolarError;
use serde::{Deserialize, Serialize};

/// Split of the synthetic channels into information (A) and frozen (A_c)
/// positions.
///
/// Serialized as the logical mask alone; deserializing rebuilds both index
/// lists from it and rejects masks whose length is not a power of two.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<bool>", into = "Vec<bool>")]
pub struct ChannelPartition {
    information: Vec<usize>,
    frozen: Vec<usize>,
    mask: Vec<bool>,
}

impl ChannelPartition {
    /// Build a partition from an N-length logical vector (`true` = A).
    pub fn from_mask(mask: Vec<bool>) -> Self {
        let (information, frozen): (Vec<usize>, Vec<usize>) =
            (0..mask.len()).partition(|&i| mask[i]);
        Self {
            information,
            frozen,
            mask,
        }
    }

    /// Information positions in increasing index order.
    pub fn information(&self) -> &[usize] {
        &self.information
    }

    /// Frozen positions in increasing index order.
    pub fn frozen(&self) -> &[usize] {
        &self.frozen
    }

    /// Logical view of A over all N positions.
    pub fn information_mask(&self) -> &[bool] {
        &self.mask
    }

    pub fn is_information(&self, index: usize) -> bool {
        self.mask.get(index).copied().unwrap_or(false)
    }

    pub fn block_len(&self) -> usize {
        self.mask.len()
    }

    pub fn info_bits(&self) -> usize {
        self.information.len()
    }
}

impl TryFrom<Vec<bool>> for ChannelPartition {
    type Error = PolarError;

    fn try_from(mask: Vec<bool>) -> Result<Self, Self::Error> {
        check_block_len(mask.len())?;
        Ok(Self::from_mask(mask))
    }
}

impl From<ChannelPartition> for Vec<bool> {
    fn from(partition: ChannelPartition) -> Self {
        partition.mask
    }
}

/// Select the `info_bits` most reliable channels (smallest Bhattacharyya
/// parameter). Equal parameters are ranked by ascending index, so the
/// selection is reproducible across implementations.
pub fn select(z: &[f64], info_bits: usize) -> Result<ChannelPartition, PolarError> {
    if info_bits > z.len() {
        return Err(PolarError::InvalidInformationBits {
            info_bits,
            block_len: z.len(),
        });
    }

    let mut ranked: Vec<usize> = (0..z.len()).collect();
    // sort_by is stable: ties keep ascending index order
    ranked.sort_by(|&a, &b| z[a].total_cmp(&z[b]));

    let mut mask = vec![false; z.len()];
    for &idx in &ranked[..info_bits] {
        mask[idx] = true;
    }
    Ok(ChannelPartition::from_mask(mask))
}
