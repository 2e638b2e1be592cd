use crate::cipher::CipherKind;
use crate::error::SchemeError;
use serde::{Deserialize, Serialize};

/// Parameters of a [`Scheme`](crate::Scheme).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    /// Block cipher applied before channel coding.
    pub cipher: CipherKind,
    /// Key size in bits.
    pub key_size: usize,
    /// Message length in bits (one cipher call).
    pub block_len: usize,
    /// Share of coded bits withheld by the key-seeded mask, in `[0, 1]`.
    pub erasure_rate: f64,
    /// Polar code block length N; a power of two above `block_len`.
    pub bec_block: usize,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            cipher: CipherKind::Des,
            key_size: 64,
            block_len: 64,
            erasure_rate: 0.25,
            bec_block: 128,
        }
    }
}

impl SchemeConfig {
    pub fn validate(&self) -> Result<(), SchemeError> {
        if !self.cipher.supports(self.key_size, self.block_len) {
            return Err(SchemeError::UnsupportedCipher {
                cipher: self.cipher,
                key_size: self.key_size,
                block_len: self.block_len,
            });
        }
        validate_code(self.block_len, self.erasure_rate, self.bec_block)
    }
}

/// Checks shared by every cipher: the coded block must be a power of two
/// strictly larger than the ciphertext.
pub(crate) fn validate_code(
    block_len: usize,
    erasure_rate: f64,
    bec_block: usize,
) -> Result<(), SchemeError> {
    if !(0.0..=1.0).contains(&erasure_rate) {
        return Err(SchemeError::InvalidConfig(format!(
            "erasure rate {erasure_rate} is outside [0, 1]"
        )));
    }
    if !bec_block.is_power_of_two() {
        return Err(SchemeError::InvalidConfig(format!(
            "coded block length {bec_block} is not a power of two"
        )));
    }
    if bec_block <= block_len {
        return Err(SchemeError::InvalidConfig(format!(
            "coded block length {bec_block} must exceed the {block_len}-bit ciphertext"
        )));
    }
    Ok(())
}
