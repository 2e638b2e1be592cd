use polar_core::{DecoderKind, PolarCode, PolarError};

fn mask(erased: &[usize]) -> Vec<bool> {
    (0..8).map(|i| erased.contains(&i)).collect()
}

#[test]
fn eight_channel_configuration() {
    let code = PolarCode::new(0.5, 8, 4).expect("code");

    let z = code.z_parameters();
    assert!((z[0] - 0.99609375).abs() < 1e-4);
    assert!((z[1] - 0.87890625).abs() < 1e-4);
    assert!((z[7] - 0.00390625).abs() < 1e-4);

    let partition = code.partition();
    for idx in [3, 5, 6] {
        assert!(partition.is_information(idx));
    }
    for idx in [0, 1] {
        assert!(!partition.is_information(idx));
    }
}

#[test]
fn messages_survive_fixed_erasure_patterns() {
    let code = PolarCode::new(0.5, 8, 4).expect("code");

    let messages = [
        [1, 0, 1, 0],
        [0, 1, 1, 0],
        [0, 0, 0, 0],
        [1, 1, 1, 1],
        [0, 0, 1, 1],
    ];
    let patterns: [&[usize]; 5] = [&[], &[0], &[4], &[4, 1], &[1, 4, 5]];

    for message in messages {
        let codeword = code.encode(&message).expect("encode");
        for pattern in patterns {
            let received = code.erase_bits(&codeword, &mask(pattern)).expect("erase");
            for kind in [DecoderKind::Naive, DecoderKind::Efficient] {
                let decoded = code.decode(&received, kind).expect("decode");
                assert_eq!(decoded, message, "pattern {pattern:?}, {kind:?}");
            }
        }
    }
}

#[test]
fn unrecoverable_pattern_signals_failure() {
    let code = PolarCode::new(0.5, 8, 4).expect("code");
    let codeword = code.encode(&[1, 0, 1, 0]).expect("encode");
    let received = code.erase_bits(&codeword, &[true; 8]).expect("erase");

    for kind in [DecoderKind::Naive, DecoderKind::Efficient] {
        let err = code.decode(&received, kind).unwrap_err();
        assert_eq!(err, PolarError::DecodeFailure { position: 3 });
    }
}
