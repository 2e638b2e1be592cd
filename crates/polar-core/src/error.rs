use thiserror::Error;

/// Canonical error type exposed by the polar coding primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolarError {
    /// The coded block length is zero or not a power of two.
    #[error("block length {0} is not a power of two")]
    InvalidBlockLength(usize),

    /// The number of information bits does not fit the block.
    #[error("{info_bits} information bits do not fit a block of {block_len}")]
    InvalidInformationBits { info_bits: usize, block_len: usize },

    /// Erasure probability outside `[0, 1]` (or not a number).
    #[error("erasure probability {0} is outside [0, 1]")]
    InvalidErasureProbability(f64),

    /// A caller supplied vector has the wrong number of elements.
    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A message or frozen bit is neither 0 nor 1.
    #[error("bit {value} at position {position} is not 0 or 1")]
    InvalidBit { position: usize, value: u8 },

    /// The erasure pattern cannot be resolved at an information position.
    #[error("decoding failed: information bit {position} is erased")]
    DecodeFailure { position: usize },

    /// A received symbol outside `{0, 1, erased}`.
    #[error("invalid channel symbol {value} at position {position}")]
    InvalidSymbol { position: usize, value: u8 },

    /// The likelihood recursion produced a value other than 0, 1 or infinity.
    #[error("unexpected likelihood ratio {value} at position {position}")]
    UnexpectedLikelihood { position: usize, value: f64 },
}

/// Coarse classification of a [`PolarError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Raised while building an engine from invalid parameters.
    Configuration,
    /// Raised per call for malformed arguments.
    Usage,
    /// The channel erased too much; the caller may retransmit.
    DecodeFailure,
    /// An algorithm bug or a corrupted input that bypassed validation.
    Invariant,
}

impl PolarError {
    pub fn class(&self) -> ErrorClass {
        match self {
            PolarError::InvalidBlockLength(_)
            | PolarError::InvalidInformationBits { .. }
            | PolarError::InvalidErasureProbability(_) => ErrorClass::Configuration,
            PolarError::LengthMismatch { .. } | PolarError::InvalidBit { .. } => {
                ErrorClass::Usage
            }
            PolarError::DecodeFailure { .. } => ErrorClass::DecodeFailure,
            PolarError::InvalidSymbol { .. } | PolarError::UnexpectedLikelihood { .. } => {
                ErrorClass::Invariant
            }
        }
    }

    pub fn is_decode_failure(&self) -> bool {
        self.class() == ErrorClass::DecodeFailure
    }
}

pub(crate) fn ensure_len(
    what: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), PolarError> {
    if expected != actual {
        return Err(PolarError::LengthMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn ensure_bits(bits: &[u8]) -> Result<(), PolarError> {
    match bits.iter().position(|&b| b > 1) {
        Some(position) => Err(PolarError::InvalidBit {
            position,
            value: bits[position],
        }),
        None => Ok(()),
    }
}
