//! Sign a message incrementally and verify it with a public-key-only engine

use rand::rngs::OsRng;
use sig_engine::{Algorithm, Key, RsaPrivateParameters, Signature, SignatureEngine};

fn main() {
    println!("=== SHA1withRSA Sign/Verify ===\n");

    // 1. Generate keys
    let rsa_key = rsa::RsaPrivateKey::new(&mut OsRng, 2048).unwrap();
    let private_key = Key::RsaPrivate(RsaPrivateParameters::try_from(&rsa_key).unwrap());
    let public_key = private_key.public_key();

    println!("✓ Generated keypair");
    println!("  {}", private_key.describe());
    println!();

    // 2. Sign message in pieces
    let mut signer = Signature::new(Algorithm::Sha1WithRsa);
    signer.init_sign(&private_key).unwrap();
    signer.update(b"Test message ");
    signer.update(b"for incremental signing");
    let signature = signer.sign().unwrap();

    println!("✓ Signing complete");
    println!("  Buffered bytes: {}", signer.buffered_len());
    println!("  Signature length: {} bytes", signature.len());
    println!();

    // 3. Verify with public key
    println!("Step: Verify with public key...");
    let mut verifier = Signature::get_instance("SHA1withRSA").unwrap();
    verifier.init_verify(&public_key).unwrap();
    verifier.update(b"Test message for incremental signing");
    match verifier.verify(&signature) {
        Ok(true) => println!("✓ Verification successful"),
        Ok(false) => println!("✗ Verification failed"),
        Err(e) => println!("✗ Verification error: {:?}", e),
    }
    println!();

    // 4. Test wrong message
    println!("Step: Test wrong message...");
    let mut verifier = Signature::get_instance("SHA1withRSA").unwrap();
    verifier.init_verify(&public_key).unwrap();
    verifier.update(b"Wrong message");
    match verifier.verify(&signature) {
        Ok(false) => println!("✓ Correct: wrong message was rejected"),
        Ok(true) => println!("✗ Critical error: wrong message was accepted!"),
        Err(e) => println!("Verification error: {:?}", e),
    }
}
