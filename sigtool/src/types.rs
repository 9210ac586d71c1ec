//! Shared data types
//!
//! Tool configuration and the small value types it is built from

use crate::error::{Result, ToolError};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text encoding of signature files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureEncoding {
    Hex,
    Base64,
}

impl SignatureEncoding {
    pub fn encode(&self, signature: &[u8]) -> String {
        match self {
            SignatureEncoding::Hex => hex::encode(signature),
            SignatureEncoding::Base64 => general_purpose::STANDARD.encode(signature),
        }
    }

    /// Decode signature text, ignoring surrounding whitespace
    ///
    /// # Errors
    /// - `Encoding` if the text is not valid for this encoding
    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        let text = text.trim();
        let bytes = match self {
            SignatureEncoding::Hex => hex::decode(text)?,
            SignatureEncoding::Base64 => general_purpose::STANDARD.decode(text)?,
        };
        Ok(bytes)
    }
}

impl FromStr for SignatureEncoding {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hex" => Ok(SignatureEncoding::Hex),
            "base64" => Ok(SignatureEncoding::Base64),
            other => Err(ToolError::Config(format!(
                "Unknown signature encoding: {} (expected hex or base64)",
                other
            ))),
        }
    }
}

/// DSA domain parameter sizes (`L-N` bits) available for key generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DsaKeySize {
    #[serde(rename = "1024-160")]
    L1024N160,
    #[serde(rename = "2048-224")]
    L2048N224,
    #[serde(rename = "2048-256")]
    L2048N256,
    #[serde(rename = "3072-256")]
    L3072N256,
}

impl DsaKeySize {
    pub const ALL: [DsaKeySize; 4] = [
        DsaKeySize::L1024N160,
        DsaKeySize::L2048N224,
        DsaKeySize::L2048N256,
        DsaKeySize::L3072N256,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DsaKeySize::L1024N160 => "1024-160",
            DsaKeySize::L2048N224 => "2048-224",
            DsaKeySize::L2048N256 => "2048-256",
            DsaKeySize::L3072N256 => "3072-256",
        }
    }

    /// Provider parameter set for generation
    #[allow(deprecated)]
    pub fn provider_size(&self) -> dsa::KeySize {
        match self {
            DsaKeySize::L1024N160 => dsa::KeySize::DSA_1024_160,
            DsaKeySize::L2048N224 => dsa::KeySize::DSA_2048_224,
            DsaKeySize::L2048N256 => dsa::KeySize::DSA_2048_256,
            DsaKeySize::L3072N256 => dsa::KeySize::DSA_3072_256,
        }
    }
}

impl FromStr for DsaKeySize {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        DsaKeySize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| {
                ToolError::Config(format!(
                    "Unknown DSA key size: {} (expected one of 1024-160, 2048-224, 2048-256, 3072-256)",
                    s
                ))
            })
    }
}

impl fmt::Display for DsaKeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tool configuration
///
/// Loaded from a config file or `SIGTOOL_*` environment variables; any field left
/// out falls back to its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Default algorithm identifier
    pub algorithm: String,

    /// Keystore directory
    pub keystore_path: String,

    /// RSA modulus size for key generation
    pub rsa_key_bits: usize,

    /// DSA parameter size for key generation
    pub dsa_key_size: DsaKeySize,

    /// Bytes fed to the engine per update when streaming files
    pub chunk_size: usize,

    /// Signature file encoding
    pub signature_encoding: SignatureEncoding,

    /// Log level (trace, debug, info, warn, error), used when `--log-level` is absent
    pub log_level: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            algorithm: std::env::var("SIGTOOL_ALGORITHM")
                .unwrap_or_else(|_| sig_engine::algorithm::SHA1_WITH_RSA.to_string()),
            keystore_path: std::env::var("SIGTOOL_KEYSTORE_PATH")
                .unwrap_or_else(|_| "./keys".to_string()),
            rsa_key_bits: std::env::var("SIGTOOL_RSA_KEY_BITS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2048),
            dsa_key_size: std::env::var("SIGTOOL_DSA_KEY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DsaKeySize::L2048N224),
            chunk_size: std::env::var("SIGTOOL_CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8192),
            signature_encoding: std::env::var("SIGTOOL_SIGNATURE_ENCODING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(SignatureEncoding::Hex),
            log_level: std::env::var("SIGTOOL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_roundtrip() {
        let signature = [0x00, 0x01, 0xfe, 0xff];

        assert_eq!(SignatureEncoding::Hex.encode(&signature), "0001feff");
        assert_eq!(SignatureEncoding::Base64.encode(&signature), "AAH+/w==");

        for encoding in [SignatureEncoding::Hex, SignatureEncoding::Base64] {
            let text = format!("{}\n", encoding.encode(&signature));
            assert_eq!(encoding.decode(&text).unwrap(), signature);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            SignatureEncoding::Hex.decode("not hex"),
            Err(ToolError::Encoding(_))
        ));
        assert!(matches!(
            SignatureEncoding::Base64.decode("%%%"),
            Err(ToolError::Encoding(_))
        ));
    }

    #[test]
    fn test_encoding_from_str() {
        assert_eq!("hex".parse::<SignatureEncoding>().unwrap(), SignatureEncoding::Hex);
        assert_eq!("BASE64".parse::<SignatureEncoding>().unwrap(), SignatureEncoding::Base64);
        assert!("pem".parse::<SignatureEncoding>().is_err());
    }

    #[test]
    fn test_dsa_key_size_names() {
        for size in DsaKeySize::ALL {
            assert_eq!(size.as_str().parse::<DsaKeySize>().unwrap(), size);
        }
        assert!("1024-224".parse::<DsaKeySize>().is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ToolConfig =
            serde_json::from_str(r#"{ "dsa_key_size": "3072-256", "signature_encoding": "base64" }"#)
                .unwrap();

        assert_eq!(config.dsa_key_size, DsaKeySize::L3072N256);
        assert_eq!(config.signature_encoding, SignatureEncoding::Base64);
        assert!(config.chunk_size > 0);
    }
}
