//! Packing between bit vectors (one `u8` per bit, MSB first) and bytes.

use crate::error::SchemeError;
use hex::ToHex;

/// Pack bits into bytes, most significant bit first. The bit count must be a
/// multiple of eight.
pub fn to_bytes(bits: &[u8]) -> Result<Vec<u8>, SchemeError> {
    if bits.len() % 8 != 0 {
        return Err(SchemeError::InvalidBits("length is not a multiple of 8"));
    }
    check(bits)?;
    Ok(bits
        .chunks_exact(8)
        .map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | bit))
        .collect())
}

/// Unpack bytes into bits, most significant bit first.
pub fn from_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1))
        .collect()
}

/// Interpret `bits` as a big-endian unsigned integer, left-padding with zero
/// bits to a whole number of bytes.
pub fn to_integer_bytes(bits: &[u8]) -> Result<Vec<u8>, SchemeError> {
    check(bits)?;
    let pad = (8 - bits.len() % 8) % 8;
    let padded: Vec<u8> = std::iter::repeat(0).take(pad).chain(bits.iter().copied()).collect();
    to_bytes(&padded)
}

pub fn from_hex(hex_str: &str) -> Result<Vec<u8>, SchemeError> {
    let bytes =
        hex::decode(hex_str.trim()).map_err(|_| SchemeError::InvalidBits("malformed hex string"))?;
    Ok(from_bytes(&bytes))
}

pub fn to_hex(bits: &[u8]) -> Result<String, SchemeError> {
    Ok(to_bytes(bits)?.encode_hex::<String>())
}

pub(crate) fn check(bits: &[u8]) -> Result<(), SchemeError> {
    if bits.iter().any(|&bit| bit > 1) {
        return Err(SchemeError::InvalidBits("bits must be 0 or 1"));
    }
    Ok(())
}
