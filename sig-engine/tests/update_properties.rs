//! Property-based tests for incremental updates

mod common;

use proptest::prelude::*;
use sig_engine::{Algorithm, Key, Signature, SignatureEngine};

fn private_key(algorithm: Algorithm) -> Key {
    match algorithm {
        Algorithm::Sha1WithRsa => common::rsa_private_key(),
        Algorithm::Sha1WithDsa => common::dsa_private_key(),
    }
}

fn sign_chunks(algorithm: Algorithm, chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut engine = Signature::new(algorithm);
    engine.init_sign(&private_key(algorithm)).unwrap();
    for chunk in chunks {
        engine.update(chunk);
    }
    engine.sign().unwrap()
}

/// Message split into arbitrary (possibly empty) chunks
fn chunked_message() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), 0..8)
}

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop_oneof![Just(Algorithm::Sha1WithRsa), Just(Algorithm::Sha1WithDsa)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn update_is_concatenation(algorithm in algorithm(), chunks in chunked_message()) {
        let whole = vec![chunks.concat()];

        prop_assert_eq!(sign_chunks(algorithm, &chunks), sign_chunks(algorithm, &whole));
    }

    #[test]
    fn buffered_len_is_sum_of_updates(algorithm in algorithm(), chunks in chunked_message()) {
        let mut engine = Signature::new(algorithm);
        for chunk in &chunks {
            engine.update(chunk);
        }

        prop_assert_eq!(engine.buffered_len(), chunks.iter().map(Vec::len).sum::<usize>());
    }

    #[test]
    fn signed_chunks_verify_as_whole(algorithm in algorithm(), chunks in chunked_message()) {
        let signature = sign_chunks(algorithm, &chunks);

        let mut verifier = Signature::new(algorithm);
        verifier.init_verify(&private_key(algorithm).public_key()).unwrap();
        verifier.update(&chunks.concat());

        prop_assert!(verifier.verify(&signature).unwrap());
    }
}
