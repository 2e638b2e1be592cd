use crate::cipher::{BitCipher, BlockCipher};
use crate::config::{validate_code, SchemeConfig};
use crate::error::SchemeError;
use crate::mask;
use polar_core::channel::{erase_bits, erasure_count, expand, puncture};
use polar_core::{DecoderKind, PolarCode};
use tracing::debug;
use zeroize::Zeroizing;

/// Block cipher followed by a polar code whose coded bits are partially
/// withheld at key-seeded positions.
///
/// Sender and receiver hold one `Scheme` each with the same key. Both sides
/// call [`Scheme::successfully_transmitted`] once per delivered message so
/// that they derive the same erasure mask for the next one.
pub struct Scheme<C = BlockCipher> {
    cipher: C,
    code: PolarCode,
    erasure_rate: f64,
    key: Option<Zeroizing<Vec<u8>>>,
    transmitted: u64,
}

impl Scheme<BlockCipher> {
    /// Build a scheme around one of the bundled block ciphers.
    pub fn new(config: SchemeConfig) -> Result<Self, SchemeError> {
        config.validate()?;
        let cipher = BlockCipher::new(config.cipher, config.key_size, config.block_len)?;
        Self::with_cipher(cipher, config.erasure_rate, config.bec_block)
    }
}

impl<C: BitCipher> Scheme<C> {
    /// Build a scheme around any [`BitCipher`]. The polar code carries one
    /// ciphertext (`cipher.block_len()` bits) per `bec_block` coded bits.
    pub fn with_cipher(
        cipher: C,
        erasure_rate: f64,
        bec_block: usize,
    ) -> Result<Self, SchemeError> {
        validate_code(cipher.block_len(), erasure_rate, bec_block)?;
        let code = PolarCode::new(erasure_rate, bec_block, cipher.block_len())?;
        Ok(Self {
            cipher,
            code,
            erasure_rate,
            key: None,
            transmitted: 0,
        })
    }

    /// Install `key` for both the cipher and the erasure mask derivation.
    pub fn set_key(&mut self, key: &[u8]) -> Result<(), SchemeError> {
        self.cipher.set_key(key)?;
        self.key = Some(Zeroizing::new(key.to_vec()));
        Ok(())
    }

    /// Encrypt and encode `message`, returning only the coded bits that the
    /// mask leaves in place.
    pub fn encode(&self, message: &[u8]) -> Result<Vec<u8>, SchemeError> {
        let positions = self.erasure_positions()?;
        let ciphertext = self.cipher.encrypt(message)?;
        let codeword = self.code.encode(&ciphertext)?;
        let received = erase_bits(&codeword, &positions)?;
        let payload = puncture(&received);

        debug!(
            counter = self.transmitted,
            message_bits = message.len(),
            payload_bits = payload.len(),
            "encoded message"
        );
        Ok(payload)
    }

    /// Reverse [`Scheme::encode`] for the current key and counter.
    ///
    /// Fails with a decode failure (see [`SchemeError::is_decode_failure`])
    /// when the withheld positions leave an information bit unresolvable.
    pub fn decode(&self, payload: &[u8]) -> Result<Vec<u8>, SchemeError> {
        let positions = self.erasure_positions()?;
        let expected = self.payload_len();
        if payload.len() != expected {
            return Err(SchemeError::InvalidBlockLength {
                expected,
                actual: payload.len(),
            });
        }

        let received = expand(payload, &positions)?;
        let ciphertext = self.code.decode(&received, DecoderKind::Efficient)?;
        let message = self.cipher.decrypt(&ciphertext)?;

        debug!(
            counter = self.transmitted,
            payload_bits = payload.len(),
            "decoded message"
        );
        Ok(message)
    }

    /// Advance the message counter after a confirmed delivery.
    pub fn successfully_transmitted(&mut self) {
        self.transmitted += 1;
    }

    /// Erasure mask for the current key and message counter.
    pub fn erasure_positions(&self) -> Result<Vec<bool>, SchemeError> {
        let key = self.key.as_ref().ok_or(SchemeError::NoKeySet)?;
        mask::erasure_mask(
            key,
            self.transmitted,
            self.code.block_len(),
            self.erasure_count(),
        )
    }

    /// Number of coded bits withheld per message, `round(N · erasure_rate)`
    /// with halfway products rounded to even.
    pub fn erasure_count(&self) -> usize {
        erasure_count(self.code.block_len(), self.erasure_rate)
    }

    /// Length of an encoded payload, N minus the erasure count.
    pub fn payload_len(&self) -> usize {
        self.code.block_len() - self.erasure_count()
    }

    pub fn transmitted_messages(&self) -> u64 {
        self.transmitted
    }

    pub fn code(&self) -> &PolarCode {
        &self.code
    }

    pub fn cipher(&self) -> &C {
        &self.cipher
    }
}
