//! sigtool: sign and verify files with SHA1withRSA / SHA1withDSA
//!
//! 1. Load configuration (file, or `SIGTOOL_*` environment) and apply CLI overrides
//! 2. Run the selected command
//! 3. `verify` exits with status 1 when the signature does not match

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use sigtool::commands::{self, SignOptions};
use sigtool::config::{self, ConfigOverrides};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// SHA-1 file signing tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "sigtool.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides config file
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a key pair into the keystore
    Keygen {
        #[command(flatten)]
        key: KeyArgs,

        /// Overwrite existing keys
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Sign a file
    Sign {
        #[command(flatten)]
        key: KeyArgs,

        /// File to sign
        #[arg(short, long)]
        input: PathBuf,

        /// Signature output file (defaults to <input>.sig)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Signature encoding (hex, base64)
        #[arg(long)]
        encoding: Option<String>,
    },

    /// Verify a file against a signature
    Verify {
        #[command(flatten)]
        key: KeyArgs,

        /// Public key file (overrides the keystore)
        #[arg(long)]
        public_key: Option<PathBuf>,

        /// Signed file
        #[arg(short, long)]
        input: PathBuf,

        /// Signature file
        #[arg(short, long)]
        signature: PathBuf,

        /// Signature encoding (hex, base64)
        #[arg(long)]
        encoding: Option<String>,
    },

    /// Show supported algorithms
    Info {
        /// Algorithm identifier (all algorithms if omitted)
        #[arg(short, long)]
        algorithm: Option<String>,
    },
}

/// Algorithm and keystore overrides
#[derive(ClapArgs, Debug)]
struct KeyArgs {
    /// Algorithm identifier (overrides config file)
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Keystore directory (overrides config file)
    #[arg(short, long)]
    keystore: Option<PathBuf>,
}

impl Command {
    /// Config values replaced by this command's flags
    fn overrides(&self) -> ConfigOverrides {
        let (key, encoding) = match self {
            Command::Keygen { key, .. } => (Some(key), None),
            Command::Sign { key, encoding, .. } | Command::Verify { key, encoding, .. } => {
                (Some(key), encoding.clone())
            }
            Command::Info { .. } => (None, None),
        };

        ConfigOverrides {
            algorithm: key.and_then(|k| k.algorithm.clone()),
            keystore_path: key.and_then(|k| k.keystore.clone()),
            signature_encoding: encoding,
            log_level: None,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Resolve configuration: file (or SIGTOOL_* env), then CLI flags
    let mut overrides = args.command.overrides();
    overrides.log_level = args.log_level.clone();
    let config =
        config::resolve_config(&args.config, &overrides).context("Invalid configuration")?;

    // 2. Initialize logging
    init_logging(&config.log_level);

    if args.config.exists() {
        info!("📋 Loaded configuration: {}", args.config.display());
    } else {
        warn!(
            "Configuration file {} does not exist, using SIGTOOL_* environment and defaults",
            args.config.display()
        );
    }
    debug!(
        "Algorithm: {}, keystore: {}, chunk size: {}",
        config.algorithm, config.keystore_path, config.chunk_size
    );

    // 3. Run command
    match args.command {
        Command::Info { algorithm } => {
            for info in commands::info(algorithm.as_deref())? {
                println!(
                    "{:<12} key={:<4} digest={} ({} bytes) resets_buffer_after_sign={}",
                    info.name,
                    info.key_algorithm.to_string(),
                    info.digest,
                    info.digest_size,
                    info.resets_buffer_after_sign
                );
            }
        }
        Command::Keygen { force, .. } => {
            let keystore = commands::keygen(&config, force).context("Key generation failed")?;
            info!(
                "✅ {} keypair ready in {}",
                keystore.algorithm(),
                keystore.base_path().display()
            );
        }
        Command::Sign { input, output, .. } => {
            let signature = output.unwrap_or_else(|| default_signature_path(&input));
            let options = SignOptions { input, signature };

            commands::sign(&config, &options).context("Signing failed")?;
            info!("✅ Signature written to {}", options.signature.display());
        }
        Command::Verify {
            public_key,
            input,
            signature,
            ..
        } => {
            let options = SignOptions { input, signature };

            let valid = commands::verify(&config, &options, public_key.as_deref())
                .context("Verification failed")?;

            if valid {
                info!("✅ Signature is valid");
            } else {
                error!("❌ Signature is NOT valid");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Install the fmt subscriber; unknown levels fall back to INFO
fn init_logging(log_level: &str) {
    let level = log_level.parse::<tracing::Level>().unwrap_or_else(|_| {
        eprintln!("⚠️  Unknown log level: {}, using INFO", log_level);
        tracing::Level::INFO
    });

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn default_signature_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".sig");
    PathBuf::from(name)
}
