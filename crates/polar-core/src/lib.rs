//! Polar codes over the binary erasure channel.
//!
//! The crate is organised leaf-first:
//!
//! * [`bhattacharyya`]: reliability of each synthetic channel for a BEC with
//!   erasure probability ε.
//! * [`selector`]: choice of the K information positions (A) and the frozen
//!   complement (A_c).
//! * [`encoder`]: the recursive butterfly transform.
//! * [`channel`]: erasure injection (probabilistic, exact-count or from an
//!   explicit mask) plus puncturing helpers.
//! * [`likelihood`] and [`decoder`]: successive-cancellation decoding, in a
//!   naive O(N²) and a memoized O(N log N) flavour that decide identically.
//! * [`code`]: [`PolarCode`], which fixes (ε, N, K) once and exposes the
//!   whole pipeline.
//!
//! Received symbols are `Option<u8>`: `Some(0)`, `Some(1)` or `None` for an
//! erasure.

pub mod bhattacharyya;
pub mod channel;
pub mod code;
pub mod decoder;
pub mod encoder;
pub mod likelihood;
pub mod selector;

mod error;

pub use channel::ErasureMode;
pub use code::{PolarCode, PolarParams};
pub use decoder::DecoderKind;
pub use error::{ErrorClass, PolarError};
pub use selector::ChannelPartition;
