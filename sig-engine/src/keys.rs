//! Key model consumed by the signature engines
//!
//! Keys are produced and owned by an external key-management collaborator. The engines
//! only read the tagged parameters from them, so the model is deliberately plain: one
//! enum tagged by algorithm and by private/public kind, each variant carrying the
//! algorithm's numeric parameters as big-endian unsigned integers.
//!
//! Parameters serialize as lowercase hex, so a [`Key`] round-trips through JSON:
//!
//! ```json
//! { "kind": "rsa_public", "modulus": "c3a1...", "public_exponent": "010001" }
//! ```

use crate::algorithm::KeyAlgorithm;
use crate::error::{Result, SignatureError};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RSA public parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaPublicParameters {
    /// Modulus `n`
    #[serde(with = "hex::serde")]
    pub modulus: Vec<u8>,
    /// Public exponent `e`
    #[serde(with = "hex::serde")]
    pub public_exponent: Vec<u8>,
}

/// RSA private parameters
///
/// CRT values are not carried; the provider recomputes them from `p` and `q`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaPrivateParameters {
    /// Modulus `n`
    #[serde(with = "hex::serde")]
    pub modulus: Vec<u8>,
    /// Public exponent `e`
    #[serde(with = "hex::serde")]
    pub public_exponent: Vec<u8>,
    /// Private exponent `d`
    #[serde(with = "hex::serde")]
    pub private_exponent: Vec<u8>,
    /// First prime factor `p`
    #[serde(with = "hex::serde")]
    pub prime1: Vec<u8>,
    /// Second prime factor `q`
    #[serde(with = "hex::serde")]
    pub prime2: Vec<u8>,
}

/// DSA public parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsaPublicParameters {
    /// Prime modulus `p`
    #[serde(with = "hex::serde")]
    pub p: Vec<u8>,
    /// Subgroup order `q`
    #[serde(with = "hex::serde")]
    pub q: Vec<u8>,
    /// Generator `g`
    #[serde(with = "hex::serde")]
    pub g: Vec<u8>,
    /// Public value `y = g^x mod p`
    #[serde(with = "hex::serde")]
    pub y: Vec<u8>,
}

/// DSA private parameters
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DsaPrivateParameters {
    /// Prime modulus `p`
    #[serde(with = "hex::serde")]
    pub p: Vec<u8>,
    /// Subgroup order `q`
    #[serde(with = "hex::serde")]
    pub q: Vec<u8>,
    /// Generator `g`
    #[serde(with = "hex::serde")]
    pub g: Vec<u8>,
    /// Public value `y`
    #[serde(with = "hex::serde")]
    pub y: Vec<u8>,
    /// Private value `x`
    #[serde(with = "hex::serde")]
    pub x: Vec<u8>,
}

/// A key tagged by algorithm and by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Key {
    RsaPrivate(RsaPrivateParameters),
    RsaPublic(RsaPublicParameters),
    DsaPrivate(DsaPrivateParameters),
    DsaPublic(DsaPublicParameters),
}

impl Key {
    /// Key family
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Key::RsaPrivate(_) | Key::RsaPublic(_) => KeyAlgorithm::Rsa,
            Key::DsaPrivate(_) | Key::DsaPublic(_) => KeyAlgorithm::Dsa,
        }
    }

    /// Whether this key carries private material
    pub fn is_private(&self) -> bool {
        matches!(self, Key::RsaPrivate(_) | Key::DsaPrivate(_))
    }

    /// Human-readable kind, e.g. `"RSA private key"`
    pub fn describe(&self) -> String {
        let kind = if self.is_private() { "private" } else { "public" };
        format!("{} {} key", self.algorithm(), kind)
    }

    /// Public half of this key (a public key returns a copy of itself)
    pub fn public_key(&self) -> Key {
        match self {
            Key::RsaPrivate(params) => Key::RsaPublic(params.public_parameters()),
            Key::DsaPrivate(params) => Key::DsaPublic(params.public_parameters()),
            public => public.clone(),
        }
    }
}

impl RsaPrivateParameters {
    /// Public parameters `(n, e)`
    pub fn public_parameters(&self) -> RsaPublicParameters {
        RsaPublicParameters {
            modulus: self.modulus.clone(),
            public_exponent: self.public_exponent.clone(),
        }
    }
}

impl DsaPrivateParameters {
    /// Public parameters `(p, q, g, y)`
    pub fn public_parameters(&self) -> DsaPublicParameters {
        DsaPublicParameters {
            p: self.p.clone(),
            q: self.q.clone(),
            g: self.g.clone(),
            y: self.y.clone(),
        }
    }
}

// Private parameters never print their secret fields.
impl fmt::Debug for RsaPrivateParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateParameters")
            .field("modulus_bits", &bit_length(&self.modulus))
            .field("public_exponent", &hex::encode(&self.public_exponent))
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for DsaPrivateParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DsaPrivateParameters")
            .field("p_bits", &bit_length(&self.p))
            .field("q_bits", &bit_length(&self.q))
            .finish_non_exhaustive()
    }
}

/// Bit length of a big-endian unsigned integer
pub(crate) fn bit_length(be: &[u8]) -> usize {
    match be.iter().position(|&b| b != 0) {
        Some(i) => (be.len() - i - 1) * 8 + (8 - be[i].leading_zeros() as usize),
        None => 0,
    }
}

impl From<RsaPrivateParameters> for Key {
    fn from(params: RsaPrivateParameters) -> Self {
        Key::RsaPrivate(params)
    }
}

impl From<RsaPublicParameters> for Key {
    fn from(params: RsaPublicParameters) -> Self {
        Key::RsaPublic(params)
    }
}

impl From<DsaPrivateParameters> for Key {
    fn from(params: DsaPrivateParameters) -> Self {
        Key::DsaPrivate(params)
    }
}

impl From<DsaPublicParameters> for Key {
    fn from(params: DsaPublicParameters) -> Self {
        Key::DsaPublic(params)
    }
}

impl TryFrom<&rsa::RsaPrivateKey> for RsaPrivateParameters {
    type Error = SignatureError;

    /// Only two-prime keys are representable.
    fn try_from(key: &rsa::RsaPrivateKey) -> Result<Self> {
        let primes = key.primes();
        if primes.len() != 2 {
            return Err(SignatureError::InvalidKey(format!(
                "Expected a two-prime RSA key, got {} primes",
                primes.len()
            )));
        }

        Ok(Self {
            modulus: key.n().to_bytes_be(),
            public_exponent: key.e().to_bytes_be(),
            private_exponent: key.d().to_bytes_be(),
            prime1: primes[0].to_bytes_be(),
            prime2: primes[1].to_bytes_be(),
        })
    }
}

impl From<&rsa::RsaPublicKey> for RsaPublicParameters {
    fn from(key: &rsa::RsaPublicKey) -> Self {
        Self {
            modulus: key.n().to_bytes_be(),
            public_exponent: key.e().to_bytes_be(),
        }
    }
}

impl From<&dsa::SigningKey> for DsaPrivateParameters {
    fn from(key: &dsa::SigningKey) -> Self {
        let verifying_key = key.verifying_key();
        let components = verifying_key.components();
        Self {
            p: components.p().to_bytes_be(),
            q: components.q().to_bytes_be(),
            g: components.g().to_bytes_be(),
            y: verifying_key.y().to_bytes_be(),
            x: key.x().to_bytes_be(),
        }
    }
}

impl From<&dsa::VerifyingKey> for DsaPublicParameters {
    fn from(key: &dsa::VerifyingKey) -> Self {
        let components = key.components();
        Self {
            p: components.p().to_bytes_be(),
            q: components.q().to_bytes_be(),
            g: components.g().to_bytes_be(),
            y: key.y().to_bytes_be(),
        }
    }
}
