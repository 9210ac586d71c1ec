//! File signing tool built on the SHA-1 signature engines
//!
//! This crate provides:
//! 1. Key generation and a JSON keystore with restrictive file permissions
//! 2. Streaming sign/verify of files through `sig_engine`
//! 3. Configuration from files or `SIGTOOL_*` environment variables
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   commands   │  ← keygen / sign / verify / info
//! └──────┬───────┘
//!        │
//!   ┌────┴─────┬──────────┬─────────┐
//!   ▼          ▼          ▼         ▼
//! Keystore  Document   Config   sig_engine
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sigtool::commands::{self, SignOptions};
//! use sigtool::config::load_config;
//!
//! let config = load_config("sigtool.toml")?;
//! let options = SignOptions {
//!     input: "report.json".into(),
//!     signature: "report.json.sig".into(),
//! };
//!
//! commands::sign(&config, &options)?;
//! assert!(commands::verify(&config, &options, None)?);
//! # Ok::<(), sigtool::ToolError>(())
//! ```

pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod keystore;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ToolError};
pub use keystore::Keystore;
pub use types::{DsaKeySize, SignatureEncoding, ToolConfig};
