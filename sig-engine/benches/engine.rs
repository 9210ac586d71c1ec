//! Benchmarks for the SHA1withRSA and SHA1withDSA engines.
//!
//! Measures signing and verification over a range of message sizes, using keys
//! generated once up front.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::OsRng;
use sig_engine::{Algorithm, DsaPrivateParameters, Key, RsaPrivateParameters, Signature, SignatureEngine};

/// Message sizes to benchmark (in bytes)
const MESSAGE_SIZES: &[usize] = &[
    32,    // Small message
    1024,  // 1 KB
    16384, // 16 KB
    65536, // 64 KB
];

fn rsa_key() -> Key {
    let key = rsa::RsaPrivateKey::new(&mut OsRng, 2048).expect("RSA key generation");
    Key::RsaPrivate(RsaPrivateParameters::try_from(&key).expect("two-prime key"))
}

fn dsa_key() -> Key {
    let components = dsa::Components::generate(&mut OsRng, dsa::KeySize::DSA_2048_224);
    let key = dsa::SigningKey::generate(&mut OsRng, components);
    Key::DsaPrivate(DsaPrivateParameters::from(&key))
}

fn bench_sign_verify(c: &mut Criterion) {
    for (algorithm, private_key) in [
        (Algorithm::Sha1WithRsa, rsa_key()),
        (Algorithm::Sha1WithDsa, dsa_key()),
    ] {
        let public_key = private_key.public_key();

        let mut group = c.benchmark_group(format!("{}_sign", algorithm));
        for &size in MESSAGE_SIZES {
            let message = vec![0x5Au8; size];
            group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, message| {
                b.iter(|| {
                    let mut engine = Signature::new(algorithm);
                    engine.init_sign(&private_key).unwrap();
                    engine.update(black_box(message));
                    black_box(engine.sign().unwrap())
                });
            });
        }
        group.finish();

        let mut group = c.benchmark_group(format!("{}_verify", algorithm));
        for &size in MESSAGE_SIZES {
            let message = vec![0x5Au8; size];
            let mut signer = Signature::new(algorithm);
            signer.init_sign(&private_key).unwrap();
            signer.update(&message);
            let signature = signer.sign().unwrap();

            group.bench_with_input(BenchmarkId::from_parameter(size), &message, |b, message| {
                b.iter(|| {
                    let mut engine = Signature::new(algorithm);
                    engine.init_verify(&public_key).unwrap();
                    engine.update(black_box(message));
                    black_box(engine.verify(&signature).unwrap())
                });
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_sign_verify);
criterion_main!(benches);
