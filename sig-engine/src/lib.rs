//! Buffered SHA-1 signature engines
//!
//! Provides two signature algorithms behind one stateful engine interface:
//! `SHA1withRSA` (PKCS#1 v1.5) and `SHA1withDSA`. Message bytes are fed incrementally
//! with `update()`, then signed or verified in one call.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sig_engine::{Key, Signature, SignatureEngine};
//! # fn load_keys() -> (Key, Key) { unimplemented!() }
//!
//! // Keys come from the caller's key management
//! let (private_key, public_key) = load_keys();
//!
//! // Sign message
//! let mut signer = Signature::get_instance("SHA1withRSA")?;
//! signer.init_sign(&private_key)?;
//! signer.update(b"Release manifest v1.4.2");
//! let signature = signer.sign()?;
//!
//! // Verify signature
//! let mut verifier = Signature::get_instance("SHA1withRSA")?;
//! verifier.init_verify(&public_key)?;
//! verifier.update(b"Release manifest v1.4.2");
//! assert!(verifier.verify(&signature)?);
//! # Ok::<(), sig_engine::SignatureError>(())
//! ```
//!
//! # Buffer retention
//!
//! After `sign()` the RSA engine keeps its buffer while the DSA engine empties it.
//! Neither engine is synchronized; use one instance per signing session.

pub mod algorithm;
pub mod dsa_sha1;
pub mod engine;
pub mod error;
pub mod keys;
pub mod rsa_sha1;
pub mod traits;

#[cfg(any(test, feature = "test-fixtures"))]
#[doc(hidden)]
pub mod fixtures;

// Re-export commonly used types
pub use algorithm::{Algorithm, AlgorithmInfo, KeyAlgorithm};
pub use engine::Signature;
pub use error::{Result, SignatureError};
pub use keys::{
    DsaPrivateParameters, DsaPublicParameters, Key, RsaPrivateParameters, RsaPublicParameters,
};
pub use traits::{Mode, SignatureEngine};
