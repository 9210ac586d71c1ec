//! Configuration management
//!
//! Loads and validates the signing tool configuration

use crate::error::{Result, ToolError};
use crate::types::{SignatureEncoding, ToolConfig};
use config::{Config, File};
use sig_engine::Algorithm;
use std::path::{Path, PathBuf};

/// Smallest RSA modulus accepted for key generation
pub const MIN_RSA_KEY_BITS: usize = 1024;

/// Largest RSA modulus accepted for key generation
pub const MAX_RSA_KEY_BITS: usize = 4096;

/// Load the tool configuration from a file
///
/// # Parameters
/// - `config_path`: config file path (TOML, JSON or YAML)
///
/// # Returns
/// - `Ok(ToolConfig)`: validated configuration
/// - `Err(ToolError::Config)`: malformed file or out-of-range values
///
/// # Example
/// ```no_run
/// use sigtool::config::load_config;
///
/// let config = load_config("sigtool.toml").expect("Failed to load config");
/// println!("Algorithm: {}", config.algorithm);
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<ToolConfig> {
    let tool_config = read_config_file(config_path.as_ref())?;
    validate_config(&tool_config)?;
    Ok(tool_config)
}

/// Load configuration from environment variables
///
/// Prefix: `SIGTOOL_`, e.g. `SIGTOOL_ALGORITHM`, `SIGTOOL_CHUNK_SIZE`
pub fn load_config_from_env() -> Result<ToolConfig> {
    let tool_config = read_config_env()?;
    validate_config(&tool_config)?;
    Ok(tool_config)
}

/// Values given on the command line; each one replaces the configured value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub algorithm: Option<String>,
    pub keystore_path: Option<PathBuf>,
    pub signature_encoding: Option<String>,
    pub log_level: Option<String>,
}

/// Apply command line overrides
///
/// # Errors
/// - `Config` if the encoding override is neither `hex` nor `base64`
pub fn apply_overrides(config: &mut ToolConfig, overrides: &ConfigOverrides) -> Result<()> {
    if let Some(algorithm) = &overrides.algorithm {
        config.algorithm = algorithm.clone();
    }
    if let Some(keystore_path) = &overrides.keystore_path {
        config.keystore_path = keystore_path.to_string_lossy().into_owned();
    }
    if let Some(encoding) = &overrides.signature_encoding {
        config.signature_encoding = encoding.parse::<SignatureEncoding>()?;
    }
    if let Some(log_level) = &overrides.log_level {
        config.log_level = log_level.clone();
    }
    Ok(())
}

/// Build the effective configuration for a run
///
/// Reads `config_path` if it exists, otherwise the `SIGTOOL_*` environment (with
/// defaults for anything unset). Overrides are applied before validation, so a flag
/// can replace an invalid file value.
pub fn resolve_config(config_path: &Path, overrides: &ConfigOverrides) -> Result<ToolConfig> {
    let mut tool_config = if config_path.exists() {
        read_config_file(config_path)?
    } else {
        read_config_env()?
    };

    apply_overrides(&mut tool_config, overrides)?;
    validate_config(&tool_config)?;

    Ok(tool_config)
}

fn read_config_file(config_path: &Path) -> Result<ToolConfig> {
    let config = Config::builder()
        .add_source(File::from(config_path))
        .build()
        .map_err(|e| ToolError::Config(format!("Failed to load config file: {}", e)))?;

    config
        .try_deserialize()
        .map_err(|e| ToolError::Config(format!("Failed to parse config: {}", e)))
}

fn read_config_env() -> Result<ToolConfig> {
    let config = Config::builder()
        .add_source(config::Environment::with_prefix("SIGTOOL"))
        .build()
        .map_err(|e| ToolError::Config(format!("Failed to load env vars: {}", e)))?;

    config
        .try_deserialize()
        .map_err(|e| ToolError::Config(format!("Failed to parse env config: {}", e)))
}

/// Check configuration values
///
/// - algorithm identifier is supported
/// - RSA key size is within range and a whole number of bytes
/// - chunk size is non-zero
/// - keystore path is non-empty
pub fn validate_config(config: &ToolConfig) -> Result<()> {
    config
        .algorithm
        .parse::<Algorithm>()
        .map_err(|e| ToolError::Config(e.to_string()))?;

    if !(MIN_RSA_KEY_BITS..=MAX_RSA_KEY_BITS).contains(&config.rsa_key_bits) {
        return Err(ToolError::Config(format!(
            "rsa_key_bits must be between {} and {}, got {}",
            MIN_RSA_KEY_BITS, MAX_RSA_KEY_BITS, config.rsa_key_bits
        )));
    }

    if config.rsa_key_bits % 8 != 0 {
        return Err(ToolError::Config(format!(
            "rsa_key_bits must be a multiple of 8, got {}",
            config.rsa_key_bits
        )));
    }

    if config.chunk_size == 0 {
        return Err(ToolError::Config(
            "chunk_size must be greater than 0".to_string(),
        ));
    }

    if config.keystore_path.trim().is_empty() {
        return Err(ToolError::Config("keystore_path must not be empty".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DsaKeySize;
    use std::io::Write;

    fn write_config(extension: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(extension)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ToolConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_unknown_algorithm() {
        let mut config = ToolConfig::default();
        config.algorithm = "MD5withRSA".to_string();

        match validate_config(&config) {
            Err(ToolError::Config(msg)) => assert!(msg.contains("MD5withRSA")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_rsa_key_bits() {
        let mut config = ToolConfig::default();
        for bits in [512, 8192, 2047] {
            config.rsa_key_bits = bits;
            assert!(validate_config(&config).is_err(), "{} bits accepted", bits);
        }
    }

    #[test]
    fn test_invalid_chunk_size() {
        let mut config = ToolConfig::default();
        config.chunk_size = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_toml_config() {
        let file = write_config(
            ".toml",
            r#"
algorithm = "SHA1withDSA"
keystore_path = "/tmp/sigtool-keys"
dsa_key_size = "1024-160"
chunk_size = 16
signature_encoding = "base64"
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.algorithm, "SHA1withDSA");
        assert_eq!(config.keystore_path, "/tmp/sigtool-keys");
        assert_eq!(config.dsa_key_size, DsaKeySize::L1024N160);
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.signature_encoding, SignatureEncoding::Base64);
    }

    #[test]
    fn test_load_config_rejects_bad_values() {
        let file = write_config(".toml", "rsa_key_bits = 100\n");
        assert!(matches!(load_config(file.path()), Err(ToolError::Config(_))));

        let file = write_config(".toml", "dsa_key_size = \"512-128\"\n");
        assert!(matches!(load_config(file.path()), Err(ToolError::Config(_))));
    }

    #[test]
    fn test_load_config_from_env() {
        std::env::set_var("SIGTOOL_CHUNK_SIZE", "16");
        std::env::set_var("SIGTOOL_ALGORITHM", "SHA1withDSA");

        let result = load_config_from_env();

        std::env::remove_var("SIGTOOL_CHUNK_SIZE");
        std::env::remove_var("SIGTOOL_ALGORITHM");

        let config = result.unwrap();
        assert_eq!(config.chunk_size, 16);
        assert_eq!(config.algorithm, "SHA1withDSA");
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = ToolConfig::default();
        let overrides = ConfigOverrides {
            algorithm: Some("SHA1withDSA".to_string()),
            keystore_path: Some(PathBuf::from("/srv/keys")),
            signature_encoding: Some("base64".to_string()),
            log_level: Some("debug".to_string()),
        };

        apply_overrides(&mut config, &overrides).unwrap();

        assert_eq!(config.algorithm, "SHA1withDSA");
        assert_eq!(config.keystore_path, "/srv/keys");
        assert_eq!(config.signature_encoding, SignatureEncoding::Base64);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_bad_encoding_override_rejected() {
        let mut config = ToolConfig::default();
        let overrides = ConfigOverrides {
            signature_encoding: Some("pem".to_string()),
            ..ConfigOverrides::default()
        };

        assert!(matches!(
            apply_overrides(&mut config, &overrides),
            Err(ToolError::Config(_))
        ));
    }

    #[test]
    fn test_overrides_apply_before_validation() {
        let file = write_config(".toml", "algorithm = \"MD5withRSA\"\nchunk_size = 32\n");

        assert!(matches!(
            resolve_config(file.path(), &ConfigOverrides::default()),
            Err(ToolError::Config(_))
        ));

        let overrides = ConfigOverrides {
            algorithm: Some("SHA1withRSA".to_string()),
            ..ConfigOverrides::default()
        };
        let config = resolve_config(file.path(), &overrides).unwrap();
        assert_eq!(config.algorithm, "SHA1withRSA");
        assert_eq!(config.chunk_size, 32);
    }

    #[test]
    fn test_missing_config_file_falls_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let overrides = ConfigOverrides {
            keystore_path: Some(temp_dir.path().join("keys")),
            ..ConfigOverrides::default()
        };

        let config = resolve_config(&temp_dir.path().join("missing.toml"), &overrides).unwrap();

        assert!(config.chunk_size > 0);
        assert!(config.algorithm.parse::<Algorithm>().is_ok());
        assert!(config.keystore_path.ends_with("keys"));
    }
}
