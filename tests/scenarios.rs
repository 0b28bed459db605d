//! Fixed scenarios for key synthesis and the codec.

use rand_chacha::ChaCha8Rng;
use toy_rsa::rsa::bigint::{from_u64, gcd};
use toy_rsa::rsa::{
    backward, forward, oracle, ByteLayout, CodecError, FixedSeed, KeyPairSynthesizer,
    RandomSampler, RsaPrivateKey, RsaPublicKey, SynthesisError,
};
use toy_rsa::util::SynthesisConfig;

fn synthesizer(seed: u64) -> KeyPairSynthesizer<ChaCha8Rng, FixedSeed> {
    KeyPairSynthesizer::new(
        SynthesisConfig::default(),
        RandomSampler::new(FixedSeed::new(seed)),
    )
    .unwrap()
}

#[test]
fn factors_3_and_11() {
    let (p, q) = (from_u64(3), from_u64(11));
    let n = &p * &q;
    let totient = (&p - 1u8) * (&q - 1u8);
    assert_eq!(n, from_u64(33));
    assert_eq!(totient, from_u64(20));

    let mut s = synthesizer(2024);
    for _ in 0..100 {
        let e = s.find_exponent(&totient, &n).unwrap();
        assert!(e <= n);
        assert_eq!(gcd(&e, &totient), from_u64(1));
    }

    // "test" cannot survive a modulus of 33
    let result = s.synthesize_from_factors(&p, &q);
    assert!(matches!(
        result,
        Err(SynthesisError::ValidationFailed) | Err(SynthesisError::Exhausted { .. })
    ));
}

#[test]
fn letter_a_roundtrip() {
    let n = from_u64(3233);
    let public = RsaPublicKey::new(from_u64(17), n.clone()).unwrap();
    let private = RsaPrivateKey::new(from_u64(2753), n).unwrap();

    let coded = forward("A", &public, ByteLayout::Legacy);
    assert_eq!(coded, "2790");
    assert_eq!(backward(&coded, &private, ByteLayout::Legacy).unwrap(), "A");
    assert!(oracle::verify(&public, &private, ByteLayout::Legacy, "A"));
}

#[test]
fn letter_a_does_not_fit_modulus_33() {
    // 65 ≡ 32 (mod 33), so "A" comes back as " "
    let public = RsaPublicKey::new(from_u64(3), from_u64(33)).unwrap();
    let private = RsaPrivateKey::new(from_u64(7), from_u64(33)).unwrap();
    let coded = forward("A", &public, ByteLayout::Legacy);
    assert_eq!(backward(&coded, &private, ByteLayout::Legacy).unwrap(), " ");
}

#[test]
fn non_integer_token_is_malformed() {
    let private = RsaPrivateKey::new(from_u64(2753), from_u64(3233)).unwrap();
    let err = backward("abc", &private, ByteLayout::Legacy).unwrap_err();
    match err {
        CodecError::MalformedInput { index, token } => {
            assert_eq!(index, 0);
            assert_eq!(token, "abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn generate_never_returns_unverified_pairs() {
    let config = SynthesisConfig::default().with_retry_budget(200, 20);
    let mut s = KeyPairSynthesizer::new(
        config.clone(),
        RandomSampler::<ChaCha8Rng, _>::new(FixedSeed::new(77)),
    )
    .unwrap();

    for _ in 0..100 {
        if let Ok(keypair) = s.generate() {
            assert!(oracle::verify(
                &keypair.public_key,
                &keypair.private_key,
                config.layout,
                &config.probe
            ));
        }
    }
}

#[test]
fn canonical_layout_is_configurable() {
    let config = SynthesisConfig::default()
        .with_layout(ByteLayout::Canonical)
        .with_retry_budget(200, 20);
    let mut s = KeyPairSynthesizer::new(
        config,
        RandomSampler::<ChaCha8Rng, _>::new(FixedSeed::new(5)),
    )
    .unwrap();

    let keypair = loop {
        if let Ok(keypair) = s.generate() {
            break keypair;
        }
    };
    let coded = keypair.public_key.forward("test", ByteLayout::Canonical);
    assert_eq!(
        keypair.private_key.backward(&coded, ByteLayout::Canonical).unwrap(),
        "test"
    );
}
