/// Unified interface for the buffered signature engines
use crate::algorithm::Algorithm;
use crate::error::{Result, SignatureError};
use crate::keys::Key;

/// Engine readiness, as set by the last successful `init_*` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Uninitialized,
    SigningReady,
    VerifyingReady,
}

/// Key material held by an engine; the variant doubles as its [`Mode`]
#[derive(Debug, Clone)]
pub(crate) enum KeyState<S, V> {
    Uninitialized,
    Signing(S),
    Verifying(V),
}

impl<S, V> KeyState<S, V> {
    pub(crate) fn mode(&self) -> Mode {
        match self {
            KeyState::Uninitialized => Mode::Uninitialized,
            KeyState::Signing(_) => Mode::SigningReady,
            KeyState::Verifying(_) => Mode::VerifyingReady,
        }
    }
}

/// Signature engine trait
///
/// Message bytes accumulate through [`update`](SignatureEngine::update) in any order
/// relative to the `init_*` calls; [`sign`](SignatureEngine::sign) and
/// [`verify`](SignatureEngine::verify) then run over everything buffered so far.
pub trait SignatureEngine {
    /// Algorithm implemented by this engine
    fn algorithm(&self) -> Algorithm;

    /// Current mode
    fn mode(&self) -> Mode;

    /// Number of message bytes currently buffered
    fn buffered_len(&self) -> usize;

    /// Append message bytes
    fn update(&mut self, data: &[u8]);

    /// Enter signing mode with a private key
    fn init_sign(&mut self, key: &Key) -> Result<()>;

    /// Enter verification mode with a public key
    fn init_verify(&mut self, key: &Key) -> Result<()>;

    /// Sign the buffered message
    fn sign(&mut self) -> Result<Vec<u8>>;

    /// Verify a signature over the buffered message
    fn verify(&mut self, signature: &[u8]) -> Result<bool>;
}

/// `InvalidKey` error for a key the engine cannot use in the requested mode
pub(crate) fn key_mismatch(algorithm: Algorithm, signing: bool, key: &Key) -> SignatureError {
    let (wanted, operation) = if signing {
        ("private", "init_sign")
    } else {
        ("public", "init_verify")
    };
    SignatureError::InvalidKey(format!(
        "{} {} requires a {} {} key, got {}",
        algorithm,
        operation,
        algorithm.key_algorithm(),
        wanted,
        key.describe()
    ))
}
