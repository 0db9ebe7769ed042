//! Raw DEFLATE (no zlib/gzip container) via flate2.

use std::io::{Read, Write};
use flate2::{Compression, write::DeflateEncoder, read::DeflateDecoder};

use crate::compression::types::CompressionError;

pub const DEFAULT_LEVEL_DEFLATE: u32 = 9;

/// Compress a whole buffer as one raw DEFLATE stream. Levels above 9 fall
/// back to the flate2 default.
pub fn deflate(input: &[u8], level: u32) -> Result<Vec<u8>, CompressionError> {
    let level = match level {
        0..=9 => Compression::new(level),
        _ => Compression::default(),
    };
    let mut enc = DeflateEncoder::new(Vec::with_capacity(input.len() / 2), level);
    enc.write_all(input)
        .map_err(|e| CompressionError::CompressFailed { msg: e.to_string() })?;
    enc.finish()
        .map_err(|e| CompressionError::CompressFailed { msg: e.to_string() })
}

/// Inflate one complete raw DEFLATE stream of at most `max_output` bytes.
pub fn inflate(input: &[u8], max_output: usize) -> Result<Vec<u8>, CompressionError> {
    let dec = DeflateDecoder::new(input);
    // One byte past the bound tells "exactly max" apart from "too large".
    let mut limited = dec.take(max_output as u64 + 1);
    let mut inflated = Vec::new();
    limited.read_to_end(&mut inflated)
        .map_err(|e| CompressionError::DecompressFailed { msg: e.to_string() })?;

    if inflated.len() > max_output {
        return Err(CompressionError::OutputTooLarge { max: max_output });
    }
    Ok(inflated)
}
