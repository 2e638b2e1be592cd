use crate::cipher::CipherKind;
use polar_core::PolarError;
use thiserror::Error;

/// Canonical error type of the security enhanced scheme.
#[derive(Debug, Error)]
pub enum SchemeError {
    /// Key material of the wrong size was supplied.
    #[error("key has {actual} bits, expected {expected}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// A message (or ciphertext) of the wrong size was supplied.
    #[error("block has {actual} bits, expected {expected}")]
    InvalidBlockLength { expected: usize, actual: usize },

    /// Encryption or decryption attempted before `set_key`.
    #[error("no key has been set")]
    NoKeySet,

    /// The cipher cannot run with the requested key size / block length.
    #[error("{cipher:?} does not support a {key_size}-bit key with {block_len}-bit blocks")]
    UnsupportedCipher {
        cipher: CipherKind,
        key_size: usize,
        block_len: usize,
    },

    /// Scheme parameters that cannot be combined.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Bit vector that is not made of 0/1 values.
    #[error("invalid bit string: {0}")]
    InvalidBits(&'static str),

    /// Failure inside the polar code, including decode failures.
    #[error(transparent)]
    Polar(#[from] PolarError),
}

impl SchemeError {
    /// True when the channel erased too much for the code to recover; the
    /// message may be retransmitted.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, SchemeError::Polar(err) if err.is_decode_failure())
    }
}
