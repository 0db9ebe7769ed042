//! compression/mod.rs
//! Raw DEFLATE adapter shared by BBQR (`Z` encoding) and KEF `+c` versions.
//!
//! - No dictionary, no flush modes: one call compresses or inflates a whole buffer.
//! - Failures never return partial output.

pub mod types;
pub mod deflate;

pub use types::*;
pub use deflate::{deflate, inflate, DEFAULT_LEVEL_DEFLATE};

use crate::constants::MAX_INFLATE_LEN;

pub fn compress(data: &[u8]) -> Result<Vec<u8>, CompressionError> {
    deflate(data, DEFAULT_LEVEL_DEFLATE)
}

pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CompressionError> {
    decompress_bounded(data, MAX_INFLATE_LEN)
}

pub fn decompress_bounded(data: &[u8], max_output: usize) -> Result<Vec<u8>, CompressionError> {
    inflate(data, max_output)
}
