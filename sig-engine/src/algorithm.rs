//! Algorithm identifiers understood by the signature factory
//!
//! Only two identifiers exist, and they are matched literally (case-sensitive):
//!
//! | Identifier    | Key type | Digest | Padding / scheme |
//! |---------------|----------|--------|------------------|
//! | `SHA1withRSA` | RSA      | SHA-1  | PKCS#1 v1.5      |
//! | `SHA1withDSA` | DSA      | SHA-1  | FIPS 186 DSA     |

use crate::error::{Result, SignatureError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of the RSA engine
pub const SHA1_WITH_RSA: &str = "SHA1withRSA";

/// Identifier of the DSA engine
pub const SHA1_WITH_DSA: &str = "SHA1withDSA";

/// SHA-1 output size in bytes
pub const SHA1_DIGEST_SIZE: usize = 20;

/// Signature algorithm selected by the factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// RSA, SHA-1 digest, PKCS#1 v1.5 padding
    #[serde(rename = "SHA1withRSA")]
    Sha1WithRsa,
    /// DSA with SHA-1 digest
    #[serde(rename = "SHA1withDSA")]
    Sha1WithDsa,
}

/// Key family a key or an engine belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyAlgorithm {
    Rsa,
    Dsa,
}

impl Algorithm {
    /// All supported algorithms, in factory order
    pub const ALL: [Algorithm; 2] = [Algorithm::Sha1WithRsa, Algorithm::Sha1WithDsa];

    /// The literal identifier accepted by [`Algorithm::from_str`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Sha1WithRsa => SHA1_WITH_RSA,
            Algorithm::Sha1WithDsa => SHA1_WITH_DSA,
        }
    }

    /// Key family this algorithm signs with
    pub fn key_algorithm(&self) -> KeyAlgorithm {
        match self {
            Algorithm::Sha1WithRsa => KeyAlgorithm::Rsa,
            Algorithm::Sha1WithDsa => KeyAlgorithm::Dsa,
        }
    }

    /// Whether `sign()` empties the message buffer
    pub fn resets_buffer_after_sign(&self) -> bool {
        matches!(self, Algorithm::Sha1WithDsa)
    }

    /// Static description of the algorithm
    pub fn info(&self) -> AlgorithmInfo {
        AlgorithmInfo {
            name: self.as_str(),
            key_algorithm: self.key_algorithm(),
            digest: "SHA-1",
            digest_size: SHA1_DIGEST_SIZE,
            resets_buffer_after_sign: self.resets_buffer_after_sign(),
        }
    }
}

impl FromStr for Algorithm {
    type Err = SignatureError;

    fn from_str(id: &str) -> Result<Self> {
        match id {
            SHA1_WITH_RSA => Ok(Algorithm::Sha1WithRsa),
            SHA1_WITH_DSA => Ok(Algorithm::Sha1WithDsa),
            other => Err(SignatureError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAlgorithm::Rsa => f.write_str("RSA"),
            KeyAlgorithm::Dsa => f.write_str("DSA"),
        }
    }
}

/// Algorithm information structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    /// Factory identifier
    pub name: &'static str,
    /// Key family
    pub key_algorithm: KeyAlgorithm,
    /// Digest name
    pub digest: &'static str,
    /// Digest size (bytes)
    pub digest_size: usize,
    /// Buffer retention policy after `sign()`
    pub resets_buffer_after_sign: bool,
}
