use crate::bits;
use crate::error::SchemeError;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit};
use aes::{Aes128, Aes256};
use des::Des;
use serde::{Deserialize, Serialize};

/// Length preserving encryption over bit vectors, keyed by a fixed-length
/// secret.
pub trait BitCipher {
    /// Key size in bits.
    fn key_size(&self) -> usize;

    /// Message (and ciphertext) length in bits.
    fn block_len(&self) -> usize;

    fn set_key(&mut self, key: &[u8]) -> Result<(), SchemeError>;

    fn encrypt(&self, message: &[u8]) -> Result<Vec<u8>, SchemeError>;

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, SchemeError>;
}

/// Block ciphers available through [`BlockCipher`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherKind {
    /// DES, 64-bit key (parity bits included), 64-bit blocks.
    #[default]
    Des,
    /// AES with a 128-bit key, 128-bit blocks.
    Aes128,
    /// AES with a 256-bit key, 128-bit blocks.
    Aes256,
}

impl CipherKind {
    /// The only key size the cipher accepts, in bits.
    pub fn key_size(self) -> usize {
        match self {
            CipherKind::Des => 64,
            CipherKind::Aes128 => 128,
            CipherKind::Aes256 => 256,
        }
    }

    /// Native block size in bits; messages must be a multiple of it.
    pub fn native_block(self) -> usize {
        match self {
            CipherKind::Des => 64,
            CipherKind::Aes128 | CipherKind::Aes256 => 128,
        }
    }

    pub fn supports(self, key_size: usize, block_len: usize) -> bool {
        key_size == self.key_size() && block_len > 0 && block_len % self.native_block() == 0
    }
}

enum Engine {
    Des(Des),
    Aes128(Aes128),
    Aes256(Aes256),
}

/// [`BitCipher`] backed by a standard block cipher; messages longer than one
/// native block are processed block by block.
pub struct BlockCipher {
    kind: CipherKind,
    block_len: usize,
    engine: Option<Engine>,
}

impl BlockCipher {
    pub fn new(kind: CipherKind, key_size: usize, block_len: usize) -> Result<Self, SchemeError> {
        if !kind.supports(key_size, block_len) {
            return Err(SchemeError::UnsupportedCipher {
                cipher: kind,
                key_size,
                block_len,
            });
        }
        Ok(Self {
            kind,
            block_len,
            engine: None,
        })
    }

    pub fn kind(&self) -> CipherKind {
        self.kind
    }

    fn engine(&self) -> Result<&Engine, SchemeError> {
        self.engine.as_ref().ok_or(SchemeError::NoKeySet)
    }

    fn block_bytes(&self, bits: &[u8]) -> Result<Vec<u8>, SchemeError> {
        if bits.len() != self.block_len {
            return Err(SchemeError::InvalidBlockLength {
                expected: self.block_len,
                actual: bits.len(),
            });
        }
        bits::to_bytes(bits)
    }
}

impl BitCipher for BlockCipher {
    fn key_size(&self) -> usize {
        self.kind.key_size()
    }

    fn block_len(&self) -> usize {
        self.block_len
    }

    fn set_key(&mut self, key: &[u8]) -> Result<(), SchemeError> {
        let expected = self.key_size();
        if key.len() != expected {
            return Err(SchemeError::InvalidKeyLength {
                expected,
                actual: key.len(),
            });
        }

        let bytes = zeroize::Zeroizing::new(bits::to_bytes(key)?);
        let invalid = |_| SchemeError::InvalidKeyLength {
            expected,
            actual: key.len(),
        };
        let engine = match self.kind {
            CipherKind::Des => Engine::Des(Des::new_from_slice(&bytes).map_err(invalid)?),
            CipherKind::Aes128 => {
                Engine::Aes128(Aes128::new_from_slice(&bytes).map_err(invalid)?)
            }
            CipherKind::Aes256 => {
                Engine::Aes256(Aes256::new_from_slice(&bytes).map_err(invalid)?)
            }
        };
        self.engine = Some(engine);
        Ok(())
    }

    fn encrypt(&self, message: &[u8]) -> Result<Vec<u8>, SchemeError> {
        let engine = self.engine()?;
        let mut bytes = self.block_bytes(message)?;
        match engine {
            Engine::Des(c) => encrypt_blocks(c, &mut bytes),
            Engine::Aes128(c) => encrypt_blocks(c, &mut bytes),
            Engine::Aes256(c) => encrypt_blocks(c, &mut bytes),
        }
        Ok(bits::from_bytes(&bytes))
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, SchemeError> {
        let engine = self.engine()?;
        let mut bytes = self.block_bytes(ciphertext)?;
        match engine {
            Engine::Des(c) => decrypt_blocks(c, &mut bytes),
            Engine::Aes128(c) => decrypt_blocks(c, &mut bytes),
            Engine::Aes256(c) => decrypt_blocks(c, &mut bytes),
        }
        Ok(bits::from_bytes(&bytes))
    }
}

fn encrypt_blocks<C: BlockEncrypt>(cipher: &C, bytes: &mut [u8]) {
    for block in bytes.chunks_exact_mut(<C as BlockSizeUser>::block_size()) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
}

fn decrypt_blocks<C: BlockDecrypt>(cipher: &C, bytes: &mut [u8]) {
    for block in bytes.chunks_exact_mut(<C as BlockSizeUser>::block_size()) {
        cipher.decrypt_block(GenericArray::from_mut_slice(block));
    }
}
