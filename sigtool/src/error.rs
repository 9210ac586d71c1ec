//! Unified error type for the signing tool
//!
//! Wraps engine errors alongside the keystore, configuration and file handling
//! failures that only exist at the tool level.

use sig_engine::SignatureError;
use thiserror::Error;

/// Signing tool error type
#[derive(Error, Debug)]
pub enum ToolError {
    /// Configuration file is malformed or holds out-of-range values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key files are missing, unreadable or hold the wrong kind of key
    #[error("Keystore error: {0}")]
    Keystore(String),

    /// Engine error (unsupported algorithm, invalid key, provider failure)
    #[error("Signature error: {0}")]
    Signature(#[from] SignatureError),

    /// Signature file is not valid hex or base64
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ToolError>;

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Serialization(err.to_string())
    }
}

impl From<hex::FromHexError> for ToolError {
    fn from(err: hex::FromHexError) -> Self {
        ToolError::Encoding(format!("invalid hex signature: {}", err))
    }
}

impl From<base64::DecodeError> for ToolError {
    fn from(err: base64::DecodeError) -> Self {
        ToolError::Encoding(format!("invalid base64 signature: {}", err))
    }
}
