//! Byte-buffer compression for canvas persistence
//!
//! DEFLATE-family (gzip) compress/decompress used by [`crate::canvas`] at
//! explicit save/load boundaries only. Decompression is bounded so a corrupt
//! or hostile record cannot balloon memory.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use thiserror::Error;

use crate::constants::MAX_DECOMPRESSED_BYTES;

/// Default compression level (speed/ratio balance).
pub const DEFAULT_LEVEL: u32 = 6;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("compression failed: {0}")]
    Compress(#[source] std::io::Error),
    #[error("decompression failed: {0}")]
    Decompress(#[source] std::io::Error),
    #[error("decompressed size exceeds {MAX_DECOMPRESSED_BYTES} bytes")]
    TooLarge,
}

/// Compress a byte buffer at the default level.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    compress_with_level(data, DEFAULT_LEVEL)
}

/// Compress a byte buffer at an explicit level (0-9, clamped).
pub fn compress_with_level(data: &[u8], level: u32) -> Result<Vec<u8>, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level.min(9)));
    encoder.write_all(data).map_err(CodecError::Compress)?;
    encoder.finish().map_err(CodecError::Compress)
}

/// Decompress a byte buffer produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    let decoder = GzDecoder::new(data);
    let mut limited = decoder.take(MAX_DECOMPRESSED_BYTES as u64 + 1);
    let mut out = Vec::new();
    limited
        .read_to_end(&mut out)
        .map_err(CodecError::Decompress)?;
    if out.len() > MAX_DECOMPRESSED_BYTES {
        return Err(CodecError::TooLarge);
    }
    Ok(out)
}
