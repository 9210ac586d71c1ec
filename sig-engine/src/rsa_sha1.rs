//! SHA1withRSA: RSA signatures with a SHA-1 digest and PKCS#1 v1.5 padding
//!
//! # Signature format
//!
//! A signature is the big-endian encoding of the RSA signature representative, always
//! exactly as long as the modulus (128 bytes for a 1024-bit key, 256 for 2048). This
//! is the layout OpenSSL, Java and .NET produce for the same algorithm, so signatures
//! interoperate in both directions.
//!
//! # Buffer retention
//!
//! The message buffer is **kept** after [`sign`](SignatureEngine::sign). Calling
//! `sign()` twice without an intervening `update()` signs the same bytes twice and,
//! PKCS#1 v1.5 being deterministic, returns the same signature twice. The DSA engine
//! does the opposite (see [`crate::dsa_sha1`]); both behaviours are part of the
//! contract.

use crate::algorithm::Algorithm;
use crate::error::{Result, SignatureError};
use crate::keys::{bit_length, Key, RsaPrivateParameters, RsaPublicParameters};
use crate::traits::{key_mismatch, KeyState, Mode, SignatureEngine};
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha1::{Digest, Sha1};

/// SHA1withRSA engine
///
/// # Example
///
/// ```rust,no_run
/// use sig_engine::rsa_sha1::RsaSha1Signature;
/// use sig_engine::traits::SignatureEngine;
/// # fn keys() -> (sig_engine::Key, sig_engine::Key) { unimplemented!() }
///
/// let (private_key, public_key) = keys();
///
/// let mut signer = RsaSha1Signature::new();
/// signer.init_sign(&private_key)?;
/// signer.update(b"Release manifest: ");
/// signer.update(b"sha=0x1234");
/// let signature = signer.sign()?;
///
/// let mut verifier = RsaSha1Signature::new();
/// verifier.init_verify(&public_key)?;
/// verifier.update(b"Release manifest: sha=0x1234");
/// assert!(verifier.verify(&signature)?);
/// # Ok::<(), sig_engine::SignatureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RsaSha1Signature {
    buffer: Vec<u8>,
    state: KeyState<RsaPrivateKey, RsaPublicKey>,
}

impl RsaSha1Signature {
    /// Create an uninitialized engine with an empty buffer
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: KeyState::Uninitialized,
        }
    }

    /// Signature length for the current key, if one is loaded
    pub fn signature_len(&self) -> Option<usize> {
        match &self.state {
            KeyState::Uninitialized => None,
            KeyState::Signing(key) => Some(key.size()),
            KeyState::Verifying(key) => Some(key.size()),
        }
    }
}

impl Default for RsaSha1Signature {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the provider's private key, which validates `n = p·q` and `d·e ≡ 1`
fn private_key_from(params: &RsaPrivateParameters) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_components(
        BigUint::from_bytes_be(&params.modulus),
        BigUint::from_bytes_be(&params.public_exponent),
        BigUint::from_bytes_be(&params.private_exponent),
        vec![
            BigUint::from_bytes_be(&params.prime1),
            BigUint::from_bytes_be(&params.prime2),
        ],
    )
    .map_err(|e| SignatureError::InvalidKey(format!("RSA private parameters rejected: {}", e)))
}

fn public_key_from(params: &RsaPublicParameters) -> Result<RsaPublicKey> {
    RsaPublicKey::new(
        BigUint::from_bytes_be(&params.modulus),
        BigUint::from_bytes_be(&params.public_exponent),
    )
    .map_err(|e| SignatureError::InvalidKey(format!("RSA public parameters rejected: {}", e)))
}

impl SignatureEngine for RsaSha1Signature {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sha1WithRsa
    }

    fn mode(&self) -> Mode {
        self.state.mode()
    }

    fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    fn update(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Load an RSA private key and enter signing mode
    ///
    /// # Errors
    /// - `InvalidKey` if `key` is not an RSA private key
    /// - `InvalidKey` if the provider rejects the parameters
    ///
    /// On error the previous mode and key are kept.
    fn init_sign(&mut self, key: &Key) -> Result<()> {
        let Key::RsaPrivate(params) = key else {
            return Err(key_mismatch(self.algorithm(), true, key));
        };

        let private_key = private_key_from(params)?;

        tracing::debug!(
            "SHA1withRSA ready to sign: modulus_bits={}, buffered={} bytes",
            bit_length(&params.modulus),
            self.buffer.len()
        );

        self.state = KeyState::Signing(private_key);
        Ok(())
    }

    /// Load an RSA public key and enter verification mode
    ///
    /// # Errors
    /// - `InvalidKey` if `key` is not an RSA public key
    /// - `InvalidKey` if the provider rejects the parameters
    fn init_verify(&mut self, key: &Key) -> Result<()> {
        let Key::RsaPublic(params) = key else {
            return Err(key_mismatch(self.algorithm(), false, key));
        };

        let public_key = public_key_from(params)?;

        tracing::debug!(
            "SHA1withRSA ready to verify: modulus_bits={}, buffered={} bytes",
            bit_length(&params.modulus),
            self.buffer.len()
        );

        self.state = KeyState::Verifying(public_key);
        Ok(())
    }

    /// Sign the buffered message with SHA-1 / PKCS#1 v1.5
    ///
    /// # Returns
    /// - Signature bytes, as long as the modulus
    ///
    /// # Errors
    /// - `NotInitialized` unless the engine is in signing mode
    /// - `CryptoFailure` if the provider fails
    ///
    /// The buffer is left untouched.
    fn sign(&mut self) -> Result<Vec<u8>> {
        let KeyState::Signing(private_key) = &self.state else {
            return Err(SignatureError::NotInitialized(
                "SHA1withRSA sign() called before init_sign()".to_string(),
            ));
        };

        let digest = Sha1::digest(&self.buffer);

        // Blinding randomizes the private-key operation, not the output
        let signature = private_key
            .sign_with_rng(&mut OsRng, Pkcs1v15Sign::new::<Sha1>(), &digest)
            .map_err(|e| SignatureError::CryptoFailure(format!("RSA signing failed: {}", e)))?;

        tracing::debug!(
            "SHA1withRSA signed: msg_len={} bytes, sig_len={} bytes",
            self.buffer.len(),
            signature.len()
        );

        Ok(signature)
    }

    /// Verify a SHA-1 / PKCS#1 v1.5 signature over the buffered message
    ///
    /// # Returns
    /// - `Ok(true)`: Signature is valid
    /// - `Ok(false)`: Well-formed signature that does not match
    ///
    /// # Errors
    /// - `NotInitialized` unless the engine is in verification mode
    /// - `CryptoFailure` if the signature length differs from the modulus length, or
    ///   its value is not below the modulus
    fn verify(&mut self, signature: &[u8]) -> Result<bool> {
        let KeyState::Verifying(public_key) = &self.state else {
            return Err(SignatureError::NotInitialized(
                "SHA1withRSA verify() called before init_verify()".to_string(),
            ));
        };

        if signature.len() != public_key.size() {
            tracing::warn!(
                "Malformed SHA1withRSA signature: expected {} bytes, got {}",
                public_key.size(),
                signature.len()
            );
            return Err(SignatureError::CryptoFailure(format!(
                "Invalid RSA signature length: expected {} bytes, got {}",
                public_key.size(),
                signature.len()
            )));
        }

        if &BigUint::from_bytes_be(signature) >= public_key.n() {
            tracing::warn!("Malformed SHA1withRSA signature: value not below the modulus");
            return Err(SignatureError::CryptoFailure(
                "RSA signature representative out of range".to_string(),
            ));
        }

        let digest = Sha1::digest(&self.buffer);

        match public_key.verify(Pkcs1v15Sign::new::<Sha1>(), &digest, signature) {
            Ok(()) => {
                tracing::debug!(
                    "SHA1withRSA signature verification: valid=true, msg_len={} bytes",
                    self.buffer.len()
                );
                Ok(true)
            }
            Err(rsa::Error::Verification) => {
                tracing::warn!("SHA1withRSA signature verification failed");
                Ok(false)
            }
            Err(e) => Err(SignatureError::CryptoFailure(format!(
                "RSA verification error: {}",
                e
            ))),
        }
    }
}
