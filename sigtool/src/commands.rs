//! Command implementations
//!
//! Each command takes the resolved configuration (config file plus CLI overrides)
//! and does its work through the keystore and document modules.

use crate::document;
use crate::error::{Result, ToolError};
use crate::keystore::{self, Keystore};
use crate::types::ToolConfig;
use sig_engine::{Algorithm, AlgorithmInfo, Key};
use std::path::{Path, PathBuf};
use tracing::info;

/// Options shared by `sign` and `verify`
#[derive(Debug, Clone)]
pub struct SignOptions {
    pub input: PathBuf,
    pub signature: PathBuf,
}

/// Parse the configured algorithm identifier
pub fn configured_algorithm(config: &ToolConfig) -> Result<Algorithm> {
    Ok(config.algorithm.parse::<Algorithm>()?)
}

/// Generate a key pair for the configured algorithm
///
/// Refuses to overwrite an existing pair unless `force` is set.
pub fn keygen(config: &ToolConfig, force: bool) -> Result<Keystore> {
    let algorithm = configured_algorithm(config)?;
    let base_path = Path::new(&config.keystore_path);
    let key_algorithm = algorithm.key_algorithm();

    if keystore::keystore_exists(base_path, key_algorithm) && !force {
        return Err(ToolError::Keystore(format!(
            "{} keys already exist in {:?} (use --force to overwrite)",
            key_algorithm, base_path
        )));
    }

    Keystore::generate_and_save(base_path, key_algorithm, config)
}

/// Sign a file and write the encoded signature
pub fn sign(config: &ToolConfig, options: &SignOptions) -> Result<Vec<u8>> {
    let algorithm = configured_algorithm(config)?;
    let keystore = Keystore::load(Path::new(&config.keystore_path), algorithm.key_algorithm())?;

    let signature = document::sign_file(
        &options.input,
        algorithm,
        keystore.private_key(),
        config.chunk_size,
    )?;
    document::write_signature(&options.signature, &signature, config.signature_encoding)?;

    info!(
        "Signed {:?}: {} byte {} signature",
        options.input,
        signature.len(),
        algorithm
    );
    Ok(signature)
}

/// Verify a file against its signature file
///
/// The public key comes from `public_key` when given, otherwise from the keystore.
pub fn verify(config: &ToolConfig, options: &SignOptions, public_key: Option<&Path>) -> Result<bool> {
    let algorithm = configured_algorithm(config)?;

    let key: Key = match public_key {
        Some(path) => keystore::read_key_file(path)?,
        None => keystore::load_public_key(Path::new(&config.keystore_path), algorithm.key_algorithm())?,
    };

    let signature = document::read_signature(&options.signature, config.signature_encoding)?;
    document::verify_file(&options.input, algorithm, &key, &signature, config.chunk_size)
}

/// Describe one algorithm, or all of them
pub fn info(algorithm: Option<&str>) -> Result<Vec<AlgorithmInfo>> {
    match algorithm {
        Some(id) => Ok(vec![id.parse::<Algorithm>()?.info()]),
        None => Ok(Algorithm::ALL.iter().map(Algorithm::info).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sig_engine::fixtures;
    use crate::types::SignatureEncoding;
    use sig_engine::SignatureError;

    fn config_for(dir: &Path, algorithm: &str) -> ToolConfig {
        ToolConfig {
            algorithm: algorithm.to_string(),
            keystore_path: dir.join("keys").to_string_lossy().into_owned(),
            chunk_size: 7,
            ..ToolConfig::default()
        }
    }

    #[test]
    fn test_sign_and_verify_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("report.json");
        std::fs::write(&input, r#"{"status":"ok","items":[1,2,3]}"#).unwrap();

        for (id, key) in [
            ("SHA1withRSA", fixtures::rsa_private_key()),
            ("SHA1withDSA", fixtures::dsa_private_key()),
        ] {
            let config = config_for(temp_dir.path(), id);
            Keystore::save(Path::new(&config.keystore_path), key).unwrap();

            let options = SignOptions {
                input: input.clone(),
                signature: temp_dir.path().join(format!("{}.sig", id)),
            };
            sign(&config, &options).unwrap();
            assert!(verify(&config, &options, None).unwrap(), "{}", id);

            std::fs::write(&options.input, "tampered").unwrap();
            assert!(!verify(&config, &options, None).unwrap(), "{}", id);
            std::fs::write(&input, r#"{"status":"ok","items":[1,2,3]}"#).unwrap();
        }
    }

    #[test]
    fn test_verify_with_explicit_public_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("message.txt");
        std::fs::write(&input, fixtures::INTEROP_MESSAGE).unwrap();

        let public_key = temp_dir.path().join("peer.json");
        std::fs::write(
            &public_key,
            serde_json::to_string(&fixtures::dsa_public_key()).unwrap(),
        )
        .unwrap();

        let mut config = config_for(temp_dir.path(), "SHA1withDSA");
        config.signature_encoding = SignatureEncoding::Base64;

        let signature = temp_dir.path().join("message.sig");
        crate::document::write_signature(
            &signature,
            &fixtures::openssl_dsa_signature(),
            SignatureEncoding::Base64,
        )
        .unwrap();

        let options = SignOptions { input, signature };
        assert!(verify(&config, &options, Some(&public_key)).unwrap());
    }

    #[test]
    fn test_malformed_signature_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = config_for(temp_dir.path(), "SHA1withRSA");
        Keystore::save(Path::new(&config.keystore_path), fixtures::rsa_private_key()).unwrap();

        let input = temp_dir.path().join("message.txt");
        std::fs::write(&input, "data").unwrap();
        let signature = temp_dir.path().join("message.sig");
        std::fs::write(&signature, "abcd\n").unwrap();

        let options = SignOptions { input, signature };
        assert!(matches!(
            verify(&config, &options, None),
            Err(ToolError::Signature(SignatureError::CryptoFailure(_)))
        ));
    }

    #[test]
    fn test_keygen_refuses_overwrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = config_for(temp_dir.path(), "SHA1withDSA");
        Keystore::save(Path::new(&config.keystore_path), fixtures::dsa_private_key()).unwrap();

        assert!(matches!(keygen(&config, false), Err(ToolError::Keystore(_))));
    }

    #[test]
    fn test_unknown_algorithm() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = config_for(temp_dir.path(), "SHA256withECDSA");

        assert!(matches!(
            keygen(&config, false),
            Err(ToolError::Signature(SignatureError::UnsupportedAlgorithm(_)))
        ));
        assert!(info(Some("SHA256withECDSA")).is_err());
    }

    #[test]
    fn test_info() {
        assert_eq!(info(None).unwrap().len(), 2);

        let rsa = info(Some("SHA1withRSA")).unwrap();
        assert_eq!(rsa[0].name, "SHA1withRSA");
        assert!(!rsa[0].resets_buffer_after_sign);
    }
}
