//! SHA1withDSA: DSA signatures over a SHA-1 digest
//!
//! # Nonces
//!
//! The per-signature secret `k` is derived deterministically from the key and the
//! digest (RFC 6979), so signing the same bytes with the same key always yields the
//! same signature. Any standard DSA verifier accepts these signatures.
//!
//! # Signature format
//!
//! IEEE P1363 `r || s`: both components big-endian and left-padded with zeros to the
//! byte length of `q`. With the classic 1024/160 parameters a signature is 40 bytes.
//! DER-encoded signatures (OpenSSL, Java) convert by unpacking the two INTEGERs.
//!
//! # Buffer reset
//!
//! A successful [`sign`](SignatureEngine::sign) **empties** the message buffer, so a
//! second `sign()` without `update()` signs empty content. The RSA engine keeps its
//! buffer instead (see [`crate::rsa_sha1`]). `verify()` never resets the buffer.

use crate::algorithm::Algorithm;
use crate::error::{Result, SignatureError};
use crate::keys::{bit_length, DsaPrivateParameters, DsaPublicParameters, Key};
use crate::traits::{key_mismatch, KeyState, Mode, SignatureEngine};
use dsa::signature::{DigestSigner, DigestVerifier};
use dsa::{BigUint, Components, SigningKey, VerifyingKey};
use sha1::{Digest, Sha1};

/// SHA1withDSA engine
#[derive(Debug, Clone)]
pub struct DsaSha1Signature {
    buffer: Vec<u8>,
    state: KeyState<SigningKey, VerifyingKey>,
}

impl DsaSha1Signature {
    /// Create an uninitialized engine with an empty buffer
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            state: KeyState::Uninitialized,
        }
    }

    /// Signature length for the current key (`2 * len(q)`), if one is loaded
    pub fn signature_len(&self) -> Option<usize> {
        match &self.state {
            KeyState::Uninitialized => None,
            KeyState::Signing(key) => Some(2 * component_len(key.verifying_key().components())),
            KeyState::Verifying(key) => Some(2 * component_len(key.components())),
        }
    }
}

impl Default for DsaSha1Signature {
    fn default() -> Self {
        Self::new()
    }
}

fn components_from(p: &[u8], q: &[u8], g: &[u8]) -> Result<Components> {
    Components::from_components(
        BigUint::from_bytes_be(p),
        BigUint::from_bytes_be(q),
        BigUint::from_bytes_be(g),
    )
    .map_err(|_| SignatureError::InvalidKey("DSA domain parameters (p, q, g) rejected".to_string()))
}

/// Rejects `y` unless `y^q mod p = 1`
fn verifying_key_from(params: &DsaPublicParameters) -> Result<VerifyingKey> {
    let components = components_from(&params.p, &params.q, &params.g)?;
    VerifyingKey::from_components(components, BigUint::from_bytes_be(&params.y))
        .map_err(|_| SignatureError::InvalidKey("DSA public value y rejected".to_string()))
}

/// Rejects `x` outside `(0, q]`
fn signing_key_from(params: &DsaPrivateParameters) -> Result<SigningKey> {
    let verifying_key = verifying_key_from(&params.public_parameters())?;
    SigningKey::from_components(verifying_key, BigUint::from_bytes_be(&params.x))
        .map_err(|_| SignatureError::InvalidKey("DSA private value x rejected".to_string()))
}

/// Byte length of one signature component
fn component_len(components: &Components) -> usize {
    (components.q().bits() + 7) / 8
}

fn encode_signature(signature: &dsa::Signature, len: usize) -> Result<Vec<u8>> {
    let mut encoded = Vec::with_capacity(2 * len);

    for component in [signature.r(), signature.s()] {
        let bytes = component.to_bytes_be();
        if bytes.len() > len {
            return Err(SignatureError::CryptoFailure(format!(
                "DSA signature component is {} bytes, expected at most {}",
                bytes.len(),
                len
            )));
        }
        encoded.resize(encoded.len() + len - bytes.len(), 0);
        encoded.extend_from_slice(&bytes);
    }

    Ok(encoded)
}

fn decode_signature(encoded: &[u8], len: usize) -> Result<dsa::Signature> {
    if encoded.len() != 2 * len {
        return Err(SignatureError::CryptoFailure(format!(
            "Invalid DSA signature length: expected {} bytes, got {}",
            2 * len,
            encoded.len()
        )));
    }

    let (r, s) = encoded.split_at(len);
    dsa::Signature::from_components(BigUint::from_bytes_be(r), BigUint::from_bytes_be(s))
        .map_err(|_| SignatureError::CryptoFailure("DSA signature component is zero".to_string()))
}

impl SignatureEngine for DsaSha1Signature {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Sha1WithDsa
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

    /// Load a DSA private key and enter signing mode
    ///
    /// # Errors
    /// - `InvalidKey` if `key` is not a DSA private key
    /// - `InvalidKey` if the domain parameters, `y` or `x` are rejected
    fn init_sign(&mut self, key: &Key) -> Result<()> {
        let Key::DsaPrivate(params) = key else {
            return Err(key_mismatch(self.algorithm(), true, key));
        };

        let signing_key = signing_key_from(params)?;

        tracing::debug!(
            "SHA1withDSA ready to sign: p_bits={}, q_bits={}, buffered={} bytes",
            bit_length(&params.p),
            bit_length(&params.q),
            self.buffer.len()
        );

        self.state = KeyState::Signing(signing_key);
        Ok(())
    }

    /// Load a DSA public key and enter verification mode
    ///
    /// # Errors
    /// - `InvalidKey` if `key` is not a DSA public key
    /// - `InvalidKey` if the domain parameters or `y` are rejected
    fn init_verify(&mut self, key: &Key) -> Result<()> {
        let Key::DsaPublic(params) = key else {
            return Err(key_mismatch(self.algorithm(), false, key));
        };

        let verifying_key = verifying_key_from(params)?;

        tracing::debug!(
            "SHA1withDSA ready to verify: p_bits={}, q_bits={}, buffered={} bytes",
            bit_length(&params.p),
            bit_length(&params.q),
            self.buffer.len()
        );

        self.state = KeyState::Verifying(verifying_key);
        Ok(())
    }

    /// Sign the buffered message, then empty the buffer
    ///
    /// # Returns
    /// - `r || s`, `2 * len(q)` bytes
    ///
    /// # Errors
    /// - `NotInitialized` unless the engine is in signing mode
    /// - `CryptoFailure` if the provider fails; the buffer is kept in that case
    fn sign(&mut self) -> Result<Vec<u8>> {
        let KeyState::Signing(signing_key) = &self.state else {
            return Err(SignatureError::NotInitialized(
                "SHA1withDSA sign() called before init_sign()".to_string(),
            ));
        };

        let signature: dsa::Signature = signing_key
            .try_sign_digest(Sha1::new_with_prefix(&self.buffer))
            .map_err(|e| SignatureError::CryptoFailure(format!("DSA signing failed: {}", e)))?;

        let encoded = encode_signature(
            &signature,
            component_len(signing_key.verifying_key().components()),
        )?;

        tracing::debug!(
            "SHA1withDSA signed: msg_len={} bytes, sig_len={} bytes (buffer reset)",
            self.buffer.len(),
            encoded.len()
        );

        self.buffer.clear();
        Ok(encoded)
    }

    /// Verify an `r || s` signature over the buffered message
    ///
    /// # Returns
    /// - `Ok(true)`: Signature is valid
    /// - `Ok(false)`: Well-formed signature that does not match
    ///
    /// # Errors
    /// - `NotInitialized` unless the engine is in verification mode
    /// - `CryptoFailure` if the length is not `2 * len(q)` or a component is zero
    fn verify(&mut self, signature: &[u8]) -> Result<bool> {
        let KeyState::Verifying(verifying_key) = &self.state else {
            return Err(SignatureError::NotInitialized(
                "SHA1withDSA verify() called before init_verify()".to_string(),
            ));
        };

        let signature = decode_signature(signature, component_len(verifying_key.components()))
            .map_err(|e| {
                tracing::warn!("Malformed SHA1withDSA signature: {}", e);
                e
            })?;

        match verifying_key.verify_digest(Sha1::new_with_prefix(&self.buffer), &signature) {
            Ok(()) => {
                tracing::debug!(
                    "SHA1withDSA signature verification: valid=true, msg_len={} bytes",
                    self.buffer.len()
                );
                Ok(true)
            }
            Err(_) => {
                tracing::warn!("SHA1withDSA signature verification failed");
                Ok(false)
            }
        }
    }
}
