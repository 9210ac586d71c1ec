//! Key management and persistence
//!
//! # Key storage
//!
//! Keys are stored **unencrypted** as JSON (`Key` serialized with hex parameters),
//! one pair per key family:
//!
//! ```text
//! {base_path}/
//!   ├── rsa_private.json  (0o600)
//!   ├── rsa_public.json   (0o644)
//!   ├── dsa_private.json  (0o600)
//!   └── dsa_public.json   (0o644)
//! ```
//!
//! Loading a private key with group or world access bits set logs a warning.
//!
//! # Example
//!
//! ```no_run
//! use sig_engine::KeyAlgorithm;
//! use sigtool::keystore::{keystore_exists, Keystore};
//! use sigtool::types::ToolConfig;
//! use std::path::Path;
//!
//! let keystore_path = Path::new("./keys");
//! let config = ToolConfig::default();
//!
//! let keystore = if keystore_exists(keystore_path, KeyAlgorithm::Rsa) {
//!     Keystore::load(keystore_path, KeyAlgorithm::Rsa)?
//! } else {
//!     Keystore::generate_and_save(keystore_path, KeyAlgorithm::Rsa, &config)?
//! };
//! println!("{}", keystore.public_key().describe());
//! # Ok::<(), sigtool::error::ToolError>(())
//! ```

use crate::error::{Result, ToolError};
use crate::types::ToolConfig;
use rand::rngs::OsRng;
use sig_engine::{DsaPrivateParameters, Key, KeyAlgorithm, RsaPrivateParameters};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const PRIVATE_KEY_MODE: u32 = 0o600;
const PUBLIC_KEY_MODE: u32 = 0o644;

/// Private key file for a key family
pub fn private_key_path(base_path: &Path, algorithm: KeyAlgorithm) -> PathBuf {
    base_path.join(format!("{}_private.json", file_prefix(algorithm)))
}

/// Public key file for a key family
pub fn public_key_path(base_path: &Path, algorithm: KeyAlgorithm) -> PathBuf {
    base_path.join(format!("{}_public.json", file_prefix(algorithm)))
}

fn file_prefix(algorithm: KeyAlgorithm) -> &'static str {
    match algorithm {
        KeyAlgorithm::Rsa => "rsa",
        KeyAlgorithm::Dsa => "dsa",
    }
}

/// Keystore: one private key (and its public half) persisted on disk
#[derive(Debug)]
pub struct Keystore {
    private_key: Key,
    base_path: PathBuf,
}

impl Keystore {
    /// Generate a new key pair and save it
    ///
    /// # Parameters
    /// - `base_path`: keystore directory (created if missing)
    /// - `algorithm`: key family to generate
    /// - `config`: supplies `rsa_key_bits` / `dsa_key_size`
    ///
    /// # Errors
    /// - `Keystore` if generation fails
    /// - `Io` if the directory or files cannot be written
    pub fn generate_and_save(
        base_path: &Path,
        algorithm: KeyAlgorithm,
        config: &ToolConfig,
    ) -> Result<Self> {
        info!("Generating new {} keypair at {:?}", algorithm, base_path);

        let private_key = generate_key(algorithm, config)?;
        Self::save(base_path, private_key)
    }

    /// Persist an existing private key and its public half
    ///
    /// Overwrites any key files of the same family.
    pub fn save(base_path: &Path, private_key: Key) -> Result<Self> {
        if !private_key.is_private() {
            return Err(ToolError::Keystore(format!(
                "Cannot store a keypair from a {}",
                private_key.describe()
            )));
        }

        fs::create_dir_all(base_path).map_err(|e| {
            ToolError::Keystore(format!(
                "Failed to create keystore directory {:?}: {}",
                base_path, e
            ))
        })?;

        let algorithm = private_key.algorithm();

        let public_path = public_key_path(base_path, algorithm);
        write_key_file(&public_path, &private_key.public_key(), PUBLIC_KEY_MODE)?;
        info!("Public key saved to {:?}", public_path);

        let private_path = private_key_path(base_path, algorithm);
        write_key_file(&private_path, &private_key, PRIVATE_KEY_MODE)?;
        info!("Private key saved to {:?}", private_path);

        Ok(Self {
            private_key,
            base_path: base_path.to_path_buf(),
        })
    }

    /// Load an existing private key
    ///
    /// # Errors
    /// - `Keystore` if the private key file is missing or holds another kind of key
    /// - `Serialization` if the file is not a valid key document
    pub fn load(base_path: &Path, algorithm: KeyAlgorithm) -> Result<Self> {
        info!("Loading {} keypair from {:?}", algorithm, base_path);

        let private_path = private_key_path(base_path, algorithm);
        if !private_path.exists() {
            return Err(ToolError::Keystore(format!(
                "Private key file not found: {:?}",
                private_path
            )));
        }

        check_private_permissions(&private_path)?;

        let private_key = read_key_file(&private_path)?;
        expect_key(&private_key, algorithm, true, &private_path)?;

        info!("Keypair successfully loaded from {:?}", base_path);

        Ok(Self {
            private_key,
            base_path: base_path.to_path_buf(),
        })
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.private_key.algorithm()
    }

    pub fn private_key(&self) -> &Key {
        &self.private_key
    }

    pub fn public_key(&self) -> Key {
        self.private_key.public_key()
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

/// Generate a fresh private key for a key family
pub fn generate_key(algorithm: KeyAlgorithm, config: &ToolConfig) -> Result<Key> {
    match algorithm {
        KeyAlgorithm::Rsa => {
            let key = rsa::RsaPrivateKey::new(&mut OsRng, config.rsa_key_bits).map_err(|e| {
                ToolError::Keystore(format!("Failed to generate RSA key: {}", e))
            })?;
            info!("Generated {}-bit RSA key", config.rsa_key_bits);
            Ok(Key::RsaPrivate(RsaPrivateParameters::try_from(&key)?))
        }
        KeyAlgorithm::Dsa => {
            let components =
                dsa::Components::generate(&mut OsRng, config.dsa_key_size.provider_size());
            let key = dsa::SigningKey::generate(&mut OsRng, components);
            info!("Generated DSA {} key", config.dsa_key_size);
            Ok(Key::DsaPrivate(DsaPrivateParameters::from(&key)))
        }
    }
}

/// Load the public key of a key family from a keystore directory
pub fn load_public_key(base_path: &Path, algorithm: KeyAlgorithm) -> Result<Key> {
    let public_path = public_key_path(base_path, algorithm);
    if !public_path.exists() {
        return Err(ToolError::Keystore(format!(
            "Public key file not found: {:?}",
            public_path
        )));
    }

    let key = read_key_file(&public_path)?;
    expect_key(&key, algorithm, false, &public_path)?;
    Ok(key)
}

/// Read a single key document
pub fn read_key_file(path: &Path) -> Result<Key> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ToolError::Keystore(format!("Failed to read key from {:?}: {}", path, e))
    })?;

    let key: Key = serde_json::from_str(&contents)?;
    debug!("Read {} from {:?}", key.describe(), path);
    Ok(key)
}

/// Check whether both key files of a family exist
pub fn keystore_exists(base_path: &Path, algorithm: KeyAlgorithm) -> bool {
    private_key_path(base_path, algorithm).exists() && public_key_path(base_path, algorithm).exists()
}

fn expect_key(key: &Key, algorithm: KeyAlgorithm, private: bool, path: &Path) -> Result<()> {
    if key.algorithm() != algorithm || key.is_private() != private {
        let kind = if private { "private" } else { "public" };
        return Err(ToolError::Keystore(format!(
            "{:?} holds a {}, expected a {} {} key",
            path,
            key.describe(),
            algorithm,
            kind
        )));
    }
    Ok(())
}

fn write_key_file(path: &Path, key: &Key, mode: u32) -> Result<()> {
    let json = serde_json::to_string_pretty(key)?;
    fs::write(path, json).map_err(|e| {
        ToolError::Keystore(format!("Failed to write key to {:?}: {}", path, e))
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| {
            ToolError::Keystore(format!("Failed to set permissions on {:?}: {}", path, e))
        })?;
        debug!("Permissions of {:?} set to {:o}", path, mode);
    }

    #[cfg(not(unix))]
    {
        let _ = mode;
        warn!("File permissions not set (non-Unix system). Ensure private key security manually!");
    }

    Ok(())
}

fn check_private_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = fs::metadata(path)
            .map_err(|e| ToolError::Keystore(format!("Failed to read key metadata: {}", e)))?
            .permissions()
            .mode()
            & 0o777;

        if mode & 0o077 != 0 {
            warn!(
                "WARNING: Private key file has insecure permissions: {:o} (should be {:o})",
                mode, PRIVATE_KEY_MODE
            );
            warn!("Run: chmod 600 {:?}", path);
        }
    }

    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sig_engine::fixtures;
    use sig_engine::{Signature, SignatureEngine};

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();

        for private_key in [fixtures::rsa_private_key(), fixtures::dsa_private_key()] {
            let algorithm = private_key.algorithm();
            Keystore::save(temp_dir.path(), private_key.clone()).unwrap();

            let loaded = Keystore::load(temp_dir.path(), algorithm).unwrap();
            assert_eq!(loaded.private_key(), &private_key);
            assert_eq!(
                load_public_key(temp_dir.path(), algorithm).unwrap(),
                private_key.public_key()
            );
        }
    }

    #[test]
    fn test_keystore_exists() {
        let temp_dir = tempfile::tempdir().unwrap();

        assert!(!keystore_exists(temp_dir.path(), KeyAlgorithm::Rsa));

        Keystore::save(temp_dir.path(), fixtures::rsa_private_key()).unwrap();
        assert!(keystore_exists(temp_dir.path(), KeyAlgorithm::Rsa));
        assert!(!keystore_exists(temp_dir.path(), KeyAlgorithm::Dsa));
    }

    #[test]
    fn test_load_nonexistent() {
        let temp_dir = tempfile::tempdir().unwrap();

        match Keystore::load(temp_dir.path(), KeyAlgorithm::Dsa) {
            Err(ToolError::Keystore(msg)) => assert!(msg.contains("not found")),
            other => panic!("Expected Keystore error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_rejects_public_key() {
        let temp_dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            Keystore::save(temp_dir.path(), fixtures::rsa_public_key()),
            Err(ToolError::Keystore(_))
        ));
    }

    #[test]
    fn test_load_rejects_wrong_key_kind() {
        let temp_dir = tempfile::tempdir().unwrap();
        Keystore::save(temp_dir.path(), fixtures::rsa_private_key()).unwrap();

        // A DSA key placed under the RSA file name
        let dsa_json = serde_json::to_string(&fixtures::dsa_private_key()).unwrap();
        fs::write(private_key_path(temp_dir.path(), KeyAlgorithm::Rsa), dsa_json).unwrap();

        assert!(matches!(
            Keystore::load(temp_dir.path(), KeyAlgorithm::Rsa),
            Err(ToolError::Keystore(_))
        ));
    }

    #[test]
    fn test_load_corrupted_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        Keystore::save(temp_dir.path(), fixtures::rsa_private_key()).unwrap();
        fs::write(public_key_path(temp_dir.path(), KeyAlgorithm::Rsa), "{ not json").unwrap();

        assert!(matches!(
            load_public_key(temp_dir.path(), KeyAlgorithm::Rsa),
            Err(ToolError::Serialization(_))
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_key_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        Keystore::save(temp_dir.path(), fixtures::dsa_private_key()).unwrap();

        let mode = |path: PathBuf| fs::metadata(path).unwrap().permissions().mode() & 0o777;

        assert_eq!(mode(private_key_path(temp_dir.path(), KeyAlgorithm::Dsa)), 0o600);
        assert_eq!(mode(public_key_path(temp_dir.path(), KeyAlgorithm::Dsa)), 0o644);
    }

    #[test]
    #[cfg(unix)]
    fn test_load_with_insecure_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        Keystore::save(temp_dir.path(), fixtures::rsa_private_key()).unwrap();

        let private_path = private_key_path(temp_dir.path(), KeyAlgorithm::Rsa);
        fs::set_permissions(&private_path, fs::Permissions::from_mode(0o644)).unwrap();

        // Loose permissions only warn
        check_private_permissions(&private_path).unwrap();
        let loaded = Keystore::load(temp_dir.path(), KeyAlgorithm::Rsa).unwrap();
        assert_eq!(loaded.private_key(), &fixtures::rsa_private_key());

        let mode = fs::metadata(&private_path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn test_generate_rsa_and_sign() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ToolConfig {
            rsa_key_bits: 1024,
            ..ToolConfig::default()
        };

        let keystore =
            Keystore::generate_and_save(temp_dir.path(), KeyAlgorithm::Rsa, &config).unwrap();
        let reloaded = Keystore::load(temp_dir.path(), KeyAlgorithm::Rsa).unwrap();

        let mut signer = Signature::get_instance("SHA1withRSA").unwrap();
        signer.init_sign(keystore.private_key()).unwrap();
        signer.update(b"Persistence test");
        let signature = signer.sign().unwrap();
        assert_eq!(signature.len(), 128);

        let mut verifier = Signature::get_instance("SHA1withRSA").unwrap();
        verifier.init_verify(&reloaded.public_key()).unwrap();
        verifier.update(b"Persistence test");
        assert!(verifier.verify(&signature).unwrap());
    }

    #[test]
    #[ignore = "DSA parameter generation is slow in debug builds"]
    fn test_generate_dsa() {
        let config = ToolConfig {
            dsa_key_size: crate::types::DsaKeySize::L1024N160,
            ..ToolConfig::default()
        };

        let key = generate_key(KeyAlgorithm::Dsa, &config).unwrap();
        assert!(key.is_private());
        assert_eq!(key.algorithm(), KeyAlgorithm::Dsa);
    }
}
