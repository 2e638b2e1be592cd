//! Successive-cancellation decoders for polar codes over a BEC.
//!
//! Bits are decided in index order. Frozen positions take their known value,
//! information positions are decided from the likelihood ratio given the
//! channel output and all earlier decisions. Both decoders share that loop
//! and differ only in how the ratio is obtained:
//!
//! * [`decode_naive`] re-runs the full recursion for every bit, O(N²).
//! * [`decode_efficient`] memoizes ratios per (position, level) and keeps
//!   the partial sums of decided bits per level, O(N log N).

use crate::bhattacharyya::check_block_len;
use crate::encoder::scatter;
use crate::error::{ensure_bits, ensure_len, PolarError};
use crate::likelihood;
use crate::selector::ChannelPartition;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which successive-cancellation implementation to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoderKind {
    Naive,
    #[default]
    Efficient,
}

/// Decode `received` with the decoder selected by `kind`.
pub fn decode(
    kind: DecoderKind,
    received: &[Option<u8>],
    frozen: &[u8],
    partition: &ChannelPartition,
) -> Result<Vec<u8>, PolarError> {
    match kind {
        DecoderKind::Naive => decode_naive(received, frozen, partition),
        DecoderKind::Efficient => decode_efficient(received, frozen, partition),
    }
}

/// Reference decoder without memoization.
pub fn decode_naive(
    received: &[Option<u8>],
    frozen: &[u8],
    partition: &ChannelPartition,
) -> Result<Vec<u8>, PolarError> {
    validate(received, frozen, partition)?;
    successive_cancellation(Naive { received }, frozen, partition)
}

/// Memoized decoder; decides exactly like [`decode_naive`].
pub fn decode_efficient(
    received: &[Option<u8>],
    frozen: &[u8],
    partition: &ChannelPartition,
) -> Result<Vec<u8>, PolarError> {
    validate(received, frozen, partition)?;
    successive_cancellation(Efficient::new(received), frozen, partition)
}

fn validate(
    received: &[Option<u8>],
    frozen: &[u8],
    partition: &ChannelPartition,
) -> Result<(), PolarError> {
    check_block_len(partition.block_len())?;
    ensure_len("received vector", partition.block_len(), received.len())?;
    ensure_len("frozen vector", partition.frozen().len(), frozen.len())?;
    ensure_bits(frozen)?;
    for (position, symbol) in received.iter().enumerate() {
        if let Some(value) = *symbol {
            if value > 1 {
                return Err(PolarError::InvalidSymbol { position, value });
            }
        }
    }
    Ok(())
}

/// Source of likelihood ratios for the decision loop.
trait LikelihoodSource {
    /// Ratio for bit `index` given the bits decided so far (`decided.len() == index`).
    fn likelihood(&mut self, index: usize, decided: &[u8]) -> Result<f64, PolarError>;

    /// Record the decision for bit `index`.
    fn commit(&mut self, _index: usize, _bit: u8) {}
}

fn successive_cancellation<S: LikelihoodSource>(
    mut source: S,
    frozen: &[u8],
    partition: &ChannelPartition,
) -> Result<Vec<u8>, PolarError> {
    let n = partition.block_len();
    let known = scatter(&vec![0u8; partition.info_bits()], frozen, partition);

    let mut decided = Vec::with_capacity(n);
    for index in 0..n {
        let bit = if partition.is_information(index) {
            let lr = source.likelihood(index, &decided)?;
            likelihood::decide(lr, index).map_err(|err| {
                if err.is_decode_failure() {
                    debug!(
                        position = index,
                        block_len = n,
                        "information bit erased, decoding aborted"
                    );
                }
                err
            })?
        } else {
            known[index]
        };
        source.commit(index, bit);
        decided.push(bit);
    }

    Ok(partition
        .information()
        .iter()
        .map(|&position| decided[position])
        .collect())
}

struct Naive<'a> {
    received: &'a [Option<u8>],
}

impl LikelihoodSource for Naive<'_> {
    fn likelihood(&mut self, index: usize, decided: &[u8]) -> Result<f64, PolarError> {
        naive_lr(self.received, 0, decided, index)
    }
}

/// `y` is the channel output of the current sub-block starting at absolute
/// position `offset`, `u` the bits decided within it.
fn naive_lr(
    y: &[Option<u8>],
    offset: usize,
    u: &[u8],
    index: usize,
) -> Result<f64, PolarError> {
    if y.len() == 1 {
        return likelihood::channel(y[0], offset);
    }

    let half = y.len() / 2;
    let pair = index / 2;
    let (mixed, passed): (Vec<u8>, Vec<u8>) = u[..2 * pair]
        .chunks_exact(2)
        .map(|bits| (bits[0] ^ bits[1], bits[1]))
        .unzip();

    let l1 = naive_lr(&y[..half], offset, &mixed, pair)?;
    let l2 = naive_lr(&y[half..], offset + half, &passed, pair)?;

    if index % 2 == 0 {
        Ok(likelihood::combine_first(l1, l2))
    } else {
        Ok(likelihood::combine_second(l1, l2, u[index - 1]))
    }
}

/// Memo tables laid out as `level * n + position`; level 0 is the decision
/// level, level `log2(n)` the channel level.
struct Efficient<'a> {
    received: &'a [Option<u8>],
    lrs: Vec<Option<f64>>,
    partial_sums: Vec<u8>,
}

impl<'a> Efficient<'a> {
    fn new(received: &'a [Option<u8>]) -> Self {
        let n = received.len();
        let levels = n.trailing_zeros() as usize + 1;
        Self {
            received,
            lrs: vec![None; levels * n],
            partial_sums: vec![0; levels * n],
        }
    }

    fn n(&self) -> usize {
        self.received.len()
    }

    fn lr(&mut self, level: usize, shift: usize, index: usize) -> Result<f64, PolarError> {
        let slot = level * self.n() + shift + index;
        if let Some(value) = self.lrs[slot] {
            return Ok(value);
        }

        let size = self.n() >> level;
        let value = if size == 1 {
            likelihood::channel(self.received[shift], shift)?
        } else {
            let half = size / 2;
            let pair = index / 2;
            let l1 = self.lr(level + 1, shift, pair)?;
            let l2 = self.lr(level + 1, shift + half, pair)?;
            if index % 2 == 0 {
                likelihood::combine_first(l1, l2)
            } else {
                likelihood::combine_second(l1, l2, self.partial_sums[slot - 1])
            }
        };

        self.lrs[slot] = Some(value);
        Ok(value)
    }

    fn store(&mut self, level: usize, shift: usize, index: usize, bit: u8) {
        let slot = level * self.n() + shift + index;
        self.partial_sums[slot] = bit;

        // a completed pair feeds one bit into each child block
        if index % 2 == 1 {
            let half = (self.n() >> level) / 2;
            let first = self.partial_sums[slot - 1];
            self.store(level + 1, shift, index / 2, first ^ bit);
            self.store(level + 1, shift + half, index / 2, bit);
        }
    }
}

impl LikelihoodSource for Efficient<'_> {
    fn likelihood(&mut self, index: usize, _decided: &[u8]) -> Result<f64, PolarError> {
        self.lr(0, 0, index)
    }

    fn commit(&mut self, index: usize, bit: u8) {
        self.store(0, 0, index, bit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bhattacharyya;
    use crate::channel::{erase_bits, shuffled_erasures};
    use crate::encoder::encode;
    use crate::selector::select;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    fn partition(epsilon: f64, n: usize, k: usize) -> ChannelPartition {
        select(&bhattacharyya::compute(epsilon, n).unwrap(), k).unwrap()
    }

    fn both(
        received: &[Option<u8>],
        frozen: &[u8],
        partition: &ChannelPartition,
    ) -> Result<Vec<u8>, PolarError> {
        let naive = decode_naive(received, frozen, partition);
        let efficient = decode_efficient(received, frozen, partition);
        assert_eq!(naive, efficient);
        efficient
    }

    #[test]
    fn round_trip_without_erasures() {
        let mut rng = StdRng::seed_from_u64(42);
        for &(n, k) in &[(1, 1), (2, 1), (8, 4), (16, 7), (64, 32), (128, 100)] {
            let partition = partition(0.3, n, k);
            let frozen = vec![0u8; n - k];
            let message: Vec<u8> = (0..k).map(|_| rng.gen_range(0..=1)).collect();
            let codeword = encode(&message, &frozen, &partition).unwrap();
            let received = erase_bits(&codeword, &vec![false; n]).unwrap();
            assert_eq!(both(&received, &frozen, &partition), Ok(message));
        }
    }

    #[test]
    fn honours_non_zero_frozen_bits() {
        let partition = partition(0.5, 8, 4);
        let frozen = [1, 0, 1, 1];
        let codeword = encode(&[0, 1, 1, 0], &frozen, &partition).unwrap();
        let mut mask = vec![false; 8];
        mask[2] = true;
        let received = erase_bits(&codeword, &mask).unwrap();
        assert_eq!(both(&received, &frozen, &partition), Ok(vec![0, 1, 1, 0]));
    }

    #[test]
    fn fails_when_pair_is_fully_erased() {
        // N = 2, K = 1: both code bits carry the single information bit
        let partition = partition(0.5, 2, 1);
        assert_eq!(partition.information(), &[1]);
        let codeword = encode(&[1], &[0], &partition).unwrap();
        assert_eq!(codeword, vec![1, 1]);

        let one_left = erase_bits(&codeword, &[true, false]).unwrap();
        assert_eq!(both(&one_left, &[0], &partition), Ok(vec![1]));

        let none_left = erase_bits(&codeword, &[true, true]).unwrap();
        assert_eq!(
            both(&none_left, &[0], &partition),
            Err(PolarError::DecodeFailure { position: 1 })
        );
    }

    #[test]
    fn fails_on_total_erasure() {
        let partition = partition(0.5, 8, 4);
        let received = vec![None; 8];
        let err = both(&received, &[0; 4], &partition).unwrap_err();
        assert_eq!(err, PolarError::DecodeFailure { position: 3 });
        assert!(err.is_decode_failure());
    }

    #[test]
    fn zero_information_bits() {
        let partition = partition(0.5, 4, 0);
        assert_eq!(both(&[None; 4], &[0; 4], &partition), Ok(vec![]));
    }

    #[test]
    fn rejects_malformed_input() {
        let partition = partition(0.5, 8, 4);
        let mut received = vec![Some(0u8); 8];
        received[6] = Some(2);
        assert_eq!(
            both(&received, &[0; 4], &partition),
            Err(PolarError::InvalidSymbol { position: 6, value: 2 })
        );
        assert!(matches!(
            both(&received[..7], &[0; 4], &partition),
            Err(PolarError::LengthMismatch { .. })
        ));
        assert!(matches!(
            both(&[Some(0); 8], &[0; 3], &partition),
            Err(PolarError::LengthMismatch { .. })
        ));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn decode_failure_logs_below_warn() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(captured.clone())
            .finish();

        let partition = partition(0.5, 2, 1);
        let result = tracing::subscriber::with_default(subscriber, || {
            decode_efficient(&[None, None], &[0], &partition)
        });
        assert_eq!(result, Err(PolarError::DecodeFailure { position: 1 }));

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("information bit erased"), "{logs}");
        assert!(logs.contains("DEBUG"), "{logs}");
        assert!(!logs.contains("WARN"), "{logs}");
    }

    #[test]
    fn rejects_partition_loaded_with_odd_size() {
        let partition = ChannelPartition::from_mask(vec![false, true, true]);
        let received = [Some(0u8); 3];
        assert_eq!(
            both(&received, &[0], &partition),
            Err(PolarError::InvalidBlockLength(3))
        );
    }

    #[test]
    fn dispatch_by_kind() {
        let partition = partition(0.25, 16, 8);
        let frozen = vec![0u8; 8];
        let message = vec![1, 1, 0, 1, 0, 0, 1, 0];
        let codeword = encode(&message, &frozen, &partition).unwrap();
        let received = erase_bits(&codeword, &vec![false; 16]).unwrap();
        for kind in [DecoderKind::Naive, DecoderKind::Efficient] {
            assert_eq!(decode(kind, &received, &frozen, &partition), Ok(message.clone()));
        }
        assert_eq!(DecoderKind::default(), DecoderKind::Efficient);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn naive_and_efficient_agree(
            log_n in 1u32..7,
            k_share in 0.0f64..=1.0,
            epsilon in 0.05f64..0.95,
            erased_share in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let n = 1usize << log_n;
            let k = ((n as f64) * k_share).floor() as usize;
            let partition = partition(epsilon, n, k);
            let frozen = vec![0u8; n - k];

            let mut rng = StdRng::seed_from_u64(seed);
            let message: Vec<u8> = (0..k).map(|_| rng.gen_range(0..=1)).collect();
            let codeword = encode(&message, &frozen, &partition).unwrap();
            let erased = ((n as f64) * erased_share).round() as usize;
            let mask = shuffled_erasures(n, erased, &mut rng);
            let received = erase_bits(&codeword, &mask).unwrap();

            let naive = decode_naive(&received, &frozen, &partition);
            let efficient = decode_efficient(&received, &frozen, &partition);
            prop_assert_eq!(&naive, &efficient);

            match efficient {
                Ok(decoded) => {
                    prop_assert_eq!(decoded, message);
                }
                Err(err) => {
                    prop_assert!(err.is_decode_failure());
                }
            }
        }
    }
}
