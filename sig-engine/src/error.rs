/// Error type definitions
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// The factory was asked for an identifier it does not know.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Wrong key algorithm, wrong key kind, or parameters rejected by the provider.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// `sign()` without `init_sign()`, or `verify()` without `init_verify()`.
    #[error("Engine not initialized: {0}")]
    NotInitialized(String),

    /// Malformed signature bytes or an internal provider failure.
    #[error("Cryptographic failure: {0}")]
    CryptoFailure(String),
}

pub type Result<T> = std::result::Result<T, SignatureError>;
