//! Signing and verifying files
//!
//! Input is streamed through the engine `chunk_size` bytes at a time, so files of
//! any size are signed without reading them into memory first. Signature files
//! hold the encoded signature followed by a newline.

use crate::error::{Result, ToolError};
use crate::types::SignatureEncoding;
use sig_engine::{Algorithm, Key, Signature, SignatureEngine};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;
use tracing::{debug, info, warn};

/// Feed a reader into an engine in `chunk_size` pieces
///
/// # Returns
/// Total number of bytes fed
pub fn update_from_reader<E, R>(engine: &mut E, mut reader: R, chunk_size: usize) -> Result<u64>
where
    E: SignatureEngine + ?Sized,
    R: Read,
{
    if chunk_size == 0 {
        return Err(ToolError::Config("chunk_size must be greater than 0".to_string()));
    }

    let mut chunk = vec![0u8; chunk_size];
    let mut total = 0u64;

    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        engine.update(&chunk[..read]);
        total += read as u64;
    }

    Ok(total)
}

/// Sign the contents of a reader
pub fn sign_reader<R: Read>(
    algorithm: Algorithm,
    private_key: &Key,
    reader: R,
    chunk_size: usize,
) -> Result<Vec<u8>> {
    let mut engine = Signature::new(algorithm);
    engine.init_sign(private_key)?;

    let total = update_from_reader(&mut engine, reader, chunk_size)?;
    let signature = engine.sign()?;

    debug!("Signed {} bytes with {}: {} byte signature", total, algorithm, signature.len());
    Ok(signature)
}

/// Verify a signature over the contents of a reader
pub fn verify_reader<R: Read>(
    algorithm: Algorithm,
    public_key: &Key,
    reader: R,
    signature: &[u8],
    chunk_size: usize,
) -> Result<bool> {
    let mut engine = Signature::new(algorithm);
    engine.init_verify(public_key)?;

    let total = update_from_reader(&mut engine, reader, chunk_size)?;
    let valid = engine.verify(signature)?;

    debug!("Verified {} bytes with {}: valid={}", total, algorithm, valid);
    Ok(valid)
}

/// Sign a file
///
/// # Errors
/// - `Io` if the file cannot be read
/// - `Signature` if the key does not fit the algorithm
pub fn sign_file(
    path: &Path,
    algorithm: Algorithm,
    private_key: &Key,
    chunk_size: usize,
) -> Result<Vec<u8>> {
    info!("Signing {:?} with {}", path, algorithm);
    let file = File::open(path)?;
    sign_reader(algorithm, private_key, BufReader::new(file), chunk_size)
}

/// Verify a file against a signature
///
/// `Ok(false)` means the signature does not match; malformed signatures surface
/// as `Signature(CryptoFailure)`.
pub fn verify_file(
    path: &Path,
    algorithm: Algorithm,
    public_key: &Key,
    signature: &[u8],
    chunk_size: usize,
) -> Result<bool> {
    info!("Verifying {:?} with {}", path, algorithm);
    let file = File::open(path)?;
    let valid = verify_reader(algorithm, public_key, BufReader::new(file), signature, chunk_size)?;

    if !valid {
        warn!("Signature does not match {:?}", path);
    }
    Ok(valid)
}

/// Write an encoded signature file
pub fn write_signature(path: &Path, signature: &[u8], encoding: SignatureEncoding) -> Result<()> {
    std::fs::write(path, format!("{}\n", encoding.encode(signature)))?;
    info!("Signature written to {:?}", path);
    Ok(())
}

/// Read an encoded signature file
pub fn read_signature(path: &Path, encoding: SignatureEncoding) -> Result<Vec<u8>> {
    let text = std::fs::read_to_string(path)?;
    encoding.decode(&text)
}
