use crate::error::PolarError;

/// Compute the Bhattacharyya parameters of the `block_len` synthetic
/// channels obtained by polarizing a BEC with erasure probability `epsilon`.
///
/// Entry `2i` holds the degraded ("minus") child of entry `i` of the half
/// length vector and entry `2i + 1` its upgraded ("plus") child. Lower is
/// more reliable.
pub fn compute(epsilon: f64, block_len: usize) -> Result<Vec<f64>, PolarError> {
    check_epsilon(epsilon)?;
    check_block_len(block_len)?;
    Ok(split(epsilon, block_len))
}

fn split(epsilon: f64, block_len: usize) -> Vec<f64> {
    if block_len == 1 {
        return vec![epsilon];
    }

    let half = split(epsilon, block_len / 2);
    let mut z = Vec::with_capacity(block_len);
    for &zh in &half {
        z.push(2.0 * zh - zh * zh);
        z.push(zh * zh);
    }
    z
}

pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), PolarError> {
    if !(0.0..=1.0).contains(&epsilon) {
        return Err(PolarError::InvalidErasureProbability(epsilon));
    }
    Ok(())
}

pub(crate) fn check_block_len(block_len: usize) -> Result<(), PolarError> {
    if !block_len.is_power_of_two() {
        return Err(PolarError::InvalidBlockLength(block_len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn base_cases() {
        assert_eq!(compute(0.3, 1).unwrap(), vec![0.3]);

        let z = compute(0.5, 2).unwrap();
        assert_close(z[0], 0.75);
        assert_close(z[1], 0.25);
    }

    #[test]
    fn matches_reference_ordering_for_eight_channels() {
        let z = compute(0.5, 8).unwrap();
        let expected = [
            0.99609375, 0.87890625, 0.80859375, 0.31640625, 0.68359375, 0.19140625, 0.12109375,
            0.00390625,
        ];
        assert_eq!(z.len(), 8);
        for (actual, expected) in z.iter().zip(expected) {
            assert_close(*actual, expected);
        }
    }

    #[test]
    fn children_bracket_their_parent() {
        for &epsilon in &[0.0, 0.1, 0.25, 0.5, 0.9, 1.0] {
            let half = compute(epsilon, 32).unwrap();
            let full = compute(epsilon, 64).unwrap();
            assert!(full.iter().all(|z| (0.0..=1.0).contains(z)));
            for (i, &parent) in half.iter().enumerate() {
                assert!(full[2 * i] >= parent - 1e-12);
                assert!(full[2 * i + 1] <= parent + 1e-12);
            }
        }
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(compute(0.5, 6), Err(PolarError::InvalidBlockLength(6)));
        assert_eq!(compute(0.5, 0), Err(PolarError::InvalidBlockLength(0)));
        assert_eq!(
            compute(1.5, 8),
            Err(PolarError::InvalidErasureProbability(1.5))
        );
        assert!(compute(f64::NAN, 8).is_err());
    }
}
