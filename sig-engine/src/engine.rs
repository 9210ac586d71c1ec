//! Signature factory
//!
//! [`Signature::get_instance`] maps an identifier to a fresh engine. The set of
//! algorithms is closed, so the engine is an enum over the two implementations rather
//! than a boxed trait object; callers still program against [`SignatureEngine`].

use crate::algorithm::Algorithm;
use crate::dsa_sha1::DsaSha1Signature;
use crate::error::Result;
use crate::keys::Key;
use crate::rsa_sha1::RsaSha1Signature;
use crate::traits::{Mode, SignatureEngine};

/// A signature engine selected by algorithm identifier
#[derive(Debug, Clone)]
pub enum Signature {
    Rsa(RsaSha1Signature),
    Dsa(DsaSha1Signature),
}

impl Signature {
    /// Create an engine from its identifier (`"SHA1withRSA"` or `"SHA1withDSA"`)
    ///
    /// # Errors
    /// - `UnsupportedAlgorithm` for any other identifier; nothing is constructed
    ///
    /// # Example
    ///
    /// ```rust
    /// use sig_engine::{Mode, Signature, SignatureEngine, SignatureError};
    ///
    /// let engine = Signature::get_instance("SHA1withDSA")?;
    /// assert_eq!(engine.mode(), Mode::Uninitialized);
    ///
    /// assert!(matches!(
    ///     Signature::get_instance("MD5withRSA"),
    ///     Err(SignatureError::UnsupportedAlgorithm(_))
    /// ));
    /// # Ok::<(), SignatureError>(())
    /// ```
    pub fn get_instance(id: &str) -> Result<Self> {
        let algorithm: Algorithm = id.parse().map_err(|e| {
            tracing::warn!("Rejected signature algorithm identifier: {:?}", id);
            e
        })?;

        Ok(Self::new(algorithm))
    }

    /// Create an engine for an already parsed algorithm
    pub fn new(algorithm: Algorithm) -> Self {
        tracing::debug!("Creating {} engine", algorithm);

        match algorithm {
            Algorithm::Sha1WithRsa => Signature::Rsa(RsaSha1Signature::new()),
            Algorithm::Sha1WithDsa => Signature::Dsa(DsaSha1Signature::new()),
        }
    }

    /// Signature length for the loaded key, if any
    pub fn signature_len(&self) -> Option<usize> {
        match self {
            Signature::Rsa(engine) => engine.signature_len(),
            Signature::Dsa(engine) => engine.signature_len(),
        }
    }

    fn inner(&self) -> &dyn SignatureEngine {
        match self {
            Signature::Rsa(engine) => engine,
            Signature::Dsa(engine) => engine,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn SignatureEngine {
        match self {
            Signature::Rsa(engine) => engine,
            Signature::Dsa(engine) => engine,
        }
    }
}

impl From<Algorithm> for Signature {
    fn from(algorithm: Algorithm) -> Self {
        Self::new(algorithm)
    }
}

impl SignatureEngine for Signature {
    fn algorithm(&self) -> Algorithm {
        self.inner().algorithm()
    }

    fn mode(&self) -> Mode {
        self.inner().mode()
    }

    fn buffered_len(&self) -> usize {
        self.inner().buffered_len()
    }

    fn update(&mut self, data: &[u8]) {
        self.inner_mut().update(data)
    }

    fn init_sign(&mut self, key: &Key) -> Result<()> {
        self.inner_mut().init_sign(key)
    }

    fn init_verify(&mut self, key: &Key) -> Result<()> {
        self.inner_mut().init_verify(key)
    }

    fn sign(&mut self) -> Result<Vec<u8>> {
        self.inner_mut().sign()
    }

    fn verify(&mut self, signature: &[u8]) -> Result<bool> {
        self.inner_mut().verify(signature)
    }
}
