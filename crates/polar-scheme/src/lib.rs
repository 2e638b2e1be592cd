//! Security enhanced encryption over a binary erasure channel.
//!
//! A message is encrypted with a block cipher, the ciphertext is polar
//! encoded, and a key-seeded share of the coded bits is withheld from the
//! transmitted payload. The legitimate receiver knows which positions are
//! missing and re-inserts them as erasures before decoding; an eavesdropper
//! without the key also has to guess where the gaps are.
//!
//! * [`cipher`]: the [`BitCipher`] capability and the bundled DES/AES
//!   backends.
//! * [`mask`]: erasure masks derived from the key and a message counter.
//! * [`scheme`]: the [`Scheme`] session tying both to a
//!   [`polar_core::PolarCode`].
//! * [`bits`]: bit/byte/hex packing.

pub mod bits;
pub mod cipher;
pub mod config;
pub mod mask;
pub mod scheme;

mod error;

pub use cipher::{BitCipher, BlockCipher, CipherKind};
pub use config::SchemeConfig;
pub use error::SchemeError;
pub use scheme::Scheme;
