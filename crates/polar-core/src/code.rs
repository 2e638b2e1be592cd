use crate::bhattacharyya::{self, check_block_len, check_epsilon};
use crate::channel::{self, ErasureMode};
use crate::decoder::{self, DecoderKind};
use crate::encoder;
use crate::error::PolarError;
use crate::selector::{self, ChannelPartition};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Construction parameters of a [`PolarCode`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarParams {
    /// Design erasure probability ε of the channel.
    pub epsilon: f64,
    /// Coded block length N (power of two).
    pub block_len: usize,
    /// Number of information bits K per block.
    pub info_bits: usize,
}

impl PolarParams {
    pub fn new(epsilon: f64, block_len: usize, info_bits: usize) -> Self {
        Self {
            epsilon,
            block_len,
            info_bits,
        }
    }

    pub fn validate(&self) -> Result<(), PolarError> {
        check_epsilon(self.epsilon)?;
        check_block_len(self.block_len)?;
        if self.info_bits > self.block_len {
            return Err(PolarError::InvalidInformationBits {
                info_bits: self.info_bits,
                block_len: self.block_len,
            });
        }
        Ok(())
    }

    /// Code rate K / N.
    pub fn rate(&self) -> f64 {
        self.info_bits as f64 / self.block_len as f64
    }
}

/// A polar code for a BEC, fixed at construction.
///
/// The Bhattacharyya parameters, the information/frozen partition and the
/// (all zero) frozen bits never change afterwards; build a new code to use
/// different parameters. Encoding and decoding keep no state between calls.
#[derive(Clone, Debug)]
pub struct PolarCode {
    params: PolarParams,
    z: Vec<f64>,
    partition: ChannelPartition,
    frozen: Vec<u8>,
}

impl PolarCode {
    pub fn new(epsilon: f64, block_len: usize, info_bits: usize) -> Result<Self, PolarError> {
        Self::from_params(PolarParams::new(epsilon, block_len, info_bits))
    }

    pub fn from_params(params: PolarParams) -> Result<Self, PolarError> {
        params.validate()?;
        let z = bhattacharyya::compute(params.epsilon, params.block_len)?;
        let partition = selector::select(&z, params.info_bits)?;
        let frozen = vec![0u8; params.block_len - params.info_bits];

        debug!(
            epsilon = params.epsilon,
            block_len = params.block_len,
            info_bits = params.info_bits,
            "constructed polar code"
        );

        Ok(Self {
            params,
            z,
            partition,
            frozen,
        })
    }

    /// Encode K message bits into an N-bit code word.
    pub fn encode(&self, message: &[u8]) -> Result<Vec<u8>, PolarError> {
        encoder::encode(message, &self.frozen, &self.partition)
    }

    /// Recover the K message bits from an N-symbol received vector.
    pub fn decode(
        &self,
        received: &[Option<u8>],
        kind: DecoderKind,
    ) -> Result<Vec<u8>, PolarError> {
        decoder::decode(kind, received, &self.frozen, &self.partition)
    }

    /// Pass a code word through a BEC with this code's erasure probability.
    pub fn simulate_bec_channel<R: Rng + ?Sized>(
        &self,
        codeword: &[u8],
        mode: ErasureMode,
        rng: &mut R,
    ) -> Result<Vec<Option<u8>>, PolarError> {
        channel::simulate(codeword, self.params.epsilon, mode, rng)
    }

    /// Erase the positions flagged in `mask`.
    pub fn erase_bits(
        &self,
        codeword: &[u8],
        mask: &[bool],
    ) -> Result<Vec<Option<u8>>, PolarError> {
        channel::erase_bits(codeword, mask)
    }

    pub fn params(&self) -> PolarParams {
        self.params
    }

    pub fn epsilon(&self) -> f64 {
        self.params.epsilon
    }

    pub fn block_len(&self) -> usize {
        self.params.block_len
    }

    pub fn info_bits(&self) -> usize {
        self.params.info_bits
    }

    /// Bhattacharyya parameter of each synthetic channel.
    pub fn z_parameters(&self) -> &[f64] {
        &self.z
    }

    pub fn partition(&self) -> &ChannelPartition {
        &self.partition
    }

    pub fn frozen_bits(&self) -> &[u8] {
        &self.frozen
    }
}
